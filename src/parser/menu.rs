// src/parser/menu.rs

//! Line classification and section/item/addon assembly.

use regex::Regex;

use crate::error::Result;
use crate::models::{MenuDocument, MenuItem, MenuSection, ParserConfig};
use crate::parser::normalize;

/// Parser for raw menu text.
///
/// Walks trimmed lines tracking the open section, the most recently
/// created item, and whether the previous line was blank. A non-blank
/// line is classified with fixed precedence: section header (requires a
/// preceding blank), addon, item. A line containing an ASCII hyphen is
/// never a header, even if it otherwise reads like a title.
pub struct MenuParser {
    marker: String,
    fallback_title: String,
    /// Any price token disqualifies a line as a header
    price_re: Regex,
    /// Trailing price anchored at line end, split off into `price`
    trailing_price_re: Regex,
    /// Any whitespace-hyphen-whitespace run collapses to " - "
    dash_run_re: Regex,
}

impl MenuParser {
    /// Build a parser from configuration.
    pub fn new(config: &ParserConfig) -> Result<Self> {
        let unit = regex::escape(config.price_unit.trim());
        Ok(Self {
            marker: config.marker.clone(),
            fallback_title: config.fallback_section.clone(),
            price_re: Regex::new(&format!(r"(?i)\d+\s*{unit}\b"))?,
            trailing_price_re: Regex::new(&format!(r"(?i)\d+\s*{unit}\b$"))?,
            dash_run_re: Regex::new(r"\s*-\s*")?,
        })
    }

    /// Parse raw text into a menu document.
    pub fn parse(&self, raw: &str) -> MenuDocument {
        let text = normalize::strip_boilerplate(raw, &self.marker);
        let text = normalize::normalize_whitespace(text);

        let mut sections: Vec<MenuSection> = Vec::new();
        // (section, item) indices of the most recently created item
        let mut last_item: Option<(usize, usize)> = None;
        // The very first line is treated as following a blank
        let mut prev_blank = true;

        for line in text.trim().lines().map(str::trim) {
            if line.is_empty() {
                prev_blank = true;
                continue;
            }

            if prev_blank && self.looks_like_header(line) {
                sections.push(MenuSection::new(line));
                last_item = None;
                prev_blank = false;
                continue;
            }

            if Self::is_addon_line(line) {
                // Attaches to the most recently created item; with no
                // item yet the line is discarded silently.
                if let Some((s, i)) = last_item {
                    let addon = line.trim_start_matches('-').trim_start();
                    sections[s].items[i].addons.push(addon.to_string());
                }
                prev_blank = false;
                continue;
            }

            // Item line. Items appearing before any header get a
            // synthesized section with the fallback title.
            if sections.is_empty() {
                sections.push(MenuSection::new(self.fallback_title.as_str()));
            }
            let section = sections.len() - 1;
            sections[section].items.push(self.parse_item(line));
            last_item = Some((section, sections[section].items.len() - 1));
            prev_blank = false;
        }

        MenuDocument { sections }
    }

    /// Header: non-empty, hyphen-free, no price token, not an addon,
    /// and (checked by the caller) preceded by a blank line.
    fn looks_like_header(&self, line: &str) -> bool {
        !line.is_empty()
            && !line.contains('-')
            && !self.price_re.is_match(line)
            && !Self::is_addon_line(line)
    }

    /// Addon: a hyphen followed by at least one whitespace character.
    fn is_addon_line(line: &str) -> bool {
        line.strip_prefix('-')
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c.is_whitespace())
    }

    /// Split an item line into name, ingredients, and trailing price.
    fn parse_item(&self, line: &str) -> MenuItem {
        // Dash variants collapse to a canonical " - " before splitting
        let dashed: String = line
            .chars()
            .map(|c| match c {
                '\u{2013}' | '\u{2014}' => '-',
                c => c,
            })
            .collect();
        let canon = self.dash_run_re.replace_all(&dashed, " - ");
        let normalized: &str = canon.as_ref();

        let (before_price, price) = match self.trailing_price_re.find(normalized) {
            Some(m) => (
                normalized[..m.start()].trim(),
                Some(m.as_str().trim().to_string()),
            ),
            None => (normalized.trim(), None),
        };

        // First " - " separates name from ingredient text
        let (name, ingredients) = match before_price.find(" - ") {
            Some(idx) => {
                let ingredients = before_price[idx + 3..].trim();
                (
                    before_price[..idx].trim().to_string(),
                    (!ingredients.is_empty()).then(|| ingredients.to_string()),
                )
            }
            None => (before_price.to_string(), None),
        };

        MenuItem {
            name,
            price,
            ingredients,
            addons: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> MenuParser {
        MenuParser::new(&ParserConfig::default()).unwrap()
    }

    #[test]
    fn test_empty_input_yields_empty_document() {
        let doc = parser().parse("");
        assert!(doc.is_empty());
        assert_eq!(doc.sections.len(), 0);
    }

    #[test]
    fn test_whitespace_only_input() {
        let doc = parser().parse("  \n\n \u{00A0} \n");
        assert!(doc.is_empty());
    }

    #[test]
    fn test_parse_is_deterministic() {
        let raw = "Pizza\n\nMargherita - tomat, ost 95 kr\n- extra ost 15 kr\n\nSallader\n";
        let p = parser();
        assert_eq!(p.parse(raw), p.parse(raw));
    }

    #[test]
    fn test_section_item_addon_assembly() {
        let doc = parser().parse("Pizza\n\nMargherita - tomato, cheese 95 kr\n- extra cheese 15 kr");

        assert_eq!(doc.sections.len(), 1);
        let section = &doc.sections[0];
        assert_eq!(section.title, "Pizza");
        assert_eq!(section.items.len(), 1);

        let item = &section.items[0];
        assert_eq!(item.name, "Margherita");
        assert_eq!(item.ingredients.as_deref(), Some("tomato, cheese"));
        assert_eq!(item.price.as_deref(), Some("95 kr"));
        assert_eq!(item.addons, vec!["extra cheese 15 kr"]);
    }

    #[test]
    fn test_header_requires_preceding_blank() {
        // "Kebab" follows a non-blank line, so it is an item, not a header
        let doc = parser().parse("Pizza\nKebab");
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].title, "Pizza");
        assert_eq!(doc.sections[0].items.len(), 1);
        assert_eq!(doc.sections[0].items[0].name, "Kebab");
    }

    #[test]
    fn test_hyphen_line_is_never_a_header() {
        let doc = parser().parse("Grill - Meny\n\nKorv 35 kr");
        // The first line contains a hyphen, so it becomes an item in a
        // synthesized fallback section
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].title, "Meny");
        assert_eq!(doc.sections[0].items[0].name, "Grill");
        assert_eq!(doc.sections[0].items[0].ingredients.as_deref(), Some("Meny"));
        assert_eq!(doc.sections[0].items[1].name, "Korv");
    }

    #[test]
    fn test_en_dash_does_not_disqualify_header() {
        // Only the ASCII hyphen disqualifies; the title keeps its en dash
        let doc = parser().parse("Fisk \u{2013} Skaldjur\n\nRäkor 120 kr");
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].title, "Fisk \u{2013} Skaldjur");
    }

    #[test]
    fn test_price_token_disqualifies_header() {
        let doc = parser().parse("Helgmeny 250 kr\n\nFörrätt");
        assert_eq!(doc.sections[0].title, "Meny");
        assert_eq!(doc.sections[0].items[0].name, "Helgmeny");
        assert_eq!(doc.sections[0].items[0].price.as_deref(), Some("250 kr"));
    }

    #[test]
    fn test_addon_before_any_item_is_discarded() {
        let doc = parser().parse("Pizza\n\n- extra cheese 15 kr");
        assert_eq!(doc.sections.len(), 1);
        assert!(doc.sections[0].items.is_empty());
    }

    #[test]
    fn test_new_section_clears_addon_target() {
        let doc = parser().parse("Pizza\n\nMargherita 95 kr\n\nSallader\n- dressing");
        // The addon follows a fresh header; it must not reach back to
        // Margherita
        assert_eq!(doc.sections.len(), 2);
        assert!(doc.sections[0].items[0].addons.is_empty());
        assert!(doc.sections[1].items.is_empty());
    }

    #[test]
    fn test_addon_attaches_across_blank_without_header() {
        let doc = parser().parse("Pizza\n\nMargherita 95 kr\n\n- extra ost");
        assert_eq!(doc.sections[0].items[0].addons, vec!["extra ost"]);
    }

    #[test]
    fn test_price_only_line_becomes_nameless_item() {
        let doc = parser().parse("Pizza\n\n95 kr");
        let item = &doc.sections[0].items[0];
        assert_eq!(item.name, "");
        assert_eq!(item.price.as_deref(), Some("95 kr"));
    }

    #[test]
    fn test_dash_variants_normalize_for_splitting() {
        let doc = parser().parse("Meny\n\nMargherita \u{2013} tomat, ost 95 kr");
        let item = &doc.sections[0].items[0];
        assert_eq!(item.name, "Margherita");
        assert_eq!(item.ingredients.as_deref(), Some("tomat, ost"));
        assert_eq!(item.price.as_deref(), Some("95 kr"));
    }

    #[test]
    fn test_tight_hyphen_splits_too() {
        let doc = parser().parse("Meny\n\nMargherita-tomat 95 kr");
        let item = &doc.sections[0].items[0];
        assert_eq!(item.name, "Margherita");
        assert_eq!(item.ingredients.as_deref(), Some("tomat"));
    }

    #[test]
    fn test_price_without_space_before_unit() {
        let doc = parser().parse("Meny\n\nBearnaise 15kr");
        assert_eq!(doc.sections[0].items[0].price.as_deref(), Some("15kr"));
    }

    #[test]
    fn test_unit_match_is_case_insensitive() {
        let doc = parser().parse("Meny\n\nKebab 99 KR");
        assert_eq!(doc.sections[0].items[0].price.as_deref(), Some("99 KR"));
    }

    #[test]
    fn test_mid_line_price_is_not_extracted() {
        let doc = parser().parse("Meny\n\nTwo for 100 kr idag");
        let item = &doc.sections[0].items[0];
        assert_eq!(item.price, None);
        assert_eq!(item.name, "Two for 100 kr idag");
    }

    #[test]
    fn test_item_without_separator_has_no_ingredients() {
        let doc = parser().parse("Meny\n\nDagens soppa 89 kr");
        let item = &doc.sections[0].items[0];
        assert_eq!(item.name, "Dagens soppa");
        assert_eq!(item.ingredients, None);
    }

    #[test]
    fn test_sections_without_items_are_kept() {
        let doc = parser().parse("Pizza\n\nDrycker");
        assert_eq!(doc.sections.len(), 2);
        assert!(doc.sections[0].items.is_empty());
        assert!(doc.sections[1].items.is_empty());
    }

    #[test]
    fn test_double_hyphen_is_an_item_not_addon() {
        let doc = parser().parse("Pizza\n\nMargherita 95 kr\n--oops");
        assert!(doc.sections[0].items[0].addons.is_empty());
        assert_eq!(doc.sections[0].items.len(), 2);
    }

    #[test]
    fn test_boilerplate_is_stripped_before_parsing() {
        let raw = "Title: Meny hos oss\n\nURL Source: https://example.com\n\nMarkdown Content:\nPizza\n\nMargherita - tomat 95 kr\n";
        let doc = parser().parse(raw);
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].title, "Pizza");
    }

    #[test]
    fn test_custom_price_unit() {
        let config = ParserConfig {
            price_unit: "sek".to_string(),
            ..ParserConfig::default()
        };
        let p = MenuParser::new(&config).unwrap();
        let doc = p.parse("Meny\n\nKebab 99 sek\nKorv 35 kr");
        assert_eq!(doc.sections[0].items[0].price.as_deref(), Some("99 sek"));
        // the default unit no longer terminates a price
        assert_eq!(doc.sections[0].items[1].price, None);
    }
}
