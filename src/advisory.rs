//! Multilingual advisory text
//!
//! Clauses are looked up in a [`ClauseTable`] keyed by risk dimension, level
//! and language. Composition walks flood, heat and storm in that order and
//! appends at most one clause per language for each.

use std::collections::HashMap;

use crate::models::{AdvisoryBundle, Language, RiskDimension, RiskLevel, RiskSummary};

type ClauseKey = (RiskDimension, RiskLevel, Language);

/// Localized advisory sentences
#[derive(Debug, Clone)]
pub struct ClauseTable {
    clauses: HashMap<ClauseKey, String>,
}

impl Default for ClauseTable {
    fn default() -> Self {
        use Language::{English, Hindi, Marathi};
        use RiskDimension::{Flood, Heat, Storm};
        use RiskLevel::{High, Low, Medium};

        let entries: [(ClauseKey, &str); 17] = [
            (
                (Flood, High, English),
                "High flood risk — move livestock/equipment to higher ground.",
            ),
            (
                (Flood, High, Hindi),
                "उच्च बाढ़ जोखिम — पशुधन और उपकरण सुरक्षित स्थान पर ले जाएं।",
            ),
            (
                (Flood, High, Marathi),
                "उच्च पूर धोका — जनावरे व उपकरणे उंच जागी हलवा.",
            ),
            (
                (Flood, Medium, English),
                "Medium flood risk — inspect low-lying fields and secure valuables.",
            ),
            (
                (Flood, Medium, Hindi),
                "मध्यम बाढ़ जोखिम — निचले क्षेत्रों की जाँच करें और सामान सुरक्षित रखें।",
            ),
            (
                (Flood, Medium, Marathi),
                "मध्यम पूर धोका — खालच्या शेतांची तपासणी करा व वस्तू सुरक्षित ठेवा.",
            ),
            (
                (Flood, Low, English),
                "Flood risk is low — normal conditions.",
            ),
            (
                (Heat, High, English),
                "High heat — avoid field work during midday; stay hydrated.",
            ),
            (
                (Heat, High, Hindi),
                "उच्च तापमान — दोपहर के दौरान खेत का काम न करें; पानी पिएं।",
            ),
            (
                (Heat, High, Marathi),
                "उच्च ताप — दुपारच्या वेळी काम टाळा; पाणी प्या.",
            ),
            (
                (Heat, Medium, English),
                "Moderate heat — take precautions during hot hours.",
            ),
            (
                (Heat, Medium, Hindi),
                "मध्यम तापमान — गर्मी के समय सावधानी रखें।",
            ),
            (
                (Heat, Medium, Marathi),
                "मध्यम ताप — गरम वेळेत खबरदारी घ्या.",
            ),
            (
                (Storm, High, English),
                "High wind risk — secure shade nets and loose equipment.",
            ),
            (
                (Storm, High, Hindi),
                "उच्च हवा जोखिम — नेट और ढीले उपकरण सुरक्षित रखें।",
            ),
            (
                (Storm, High, Marathi),
                "उच्च वारा धोका — जाळी आणि ढीले उपकरण सुरक्षित ठेवा.",
            ),
            (
                (Storm, Medium, English),
                "Moderate winds — be cautious while working at heights.",
            ),
        ];

        Self {
            clauses: entries
                .into_iter()
                .map(|(key, text)| (key, text.to_string()))
                .collect(),
        }
    }
}

impl ClauseTable {
    /// A table with no clauses at all
    #[must_use]
    pub fn empty() -> Self {
        Self {
            clauses: HashMap::new(),
        }
    }

    /// Add or replace a clause
    #[must_use]
    pub fn with_clause(
        mut self,
        dimension: RiskDimension,
        level: RiskLevel,
        language: Language,
        text: impl Into<String>,
    ) -> Self {
        self.clauses.insert((dimension, level, language), text.into());
        self
    }

    #[must_use]
    pub fn clause(
        &self,
        dimension: RiskDimension,
        level: RiskLevel,
        language: Language,
    ) -> Option<&str> {
        self.clauses
            .get(&(dimension, level, language))
            .map(String::as_str)
    }
}

/// Renders risk summaries into advisory text
#[derive(Debug, Clone, Default)]
pub struct AdvisoryComposer {
    table: ClauseTable,
}

impl AdvisoryComposer {
    #[must_use]
    pub fn new(table: ClauseTable) -> Self {
        Self { table }
    }

    /// Build the advisory bundle for a risk summary.
    ///
    /// A language without any matching clause gets the full English text.
    #[must_use]
    pub fn compose(&self, risk: &RiskSummary) -> AdvisoryBundle {
        let advisory_en = self.join_clauses(risk, Language::English);
        let localized = |language| {
            let text = self.join_clauses(risk, language);
            if text.is_empty() {
                advisory_en.clone()
            } else {
                text
            }
        };

        AdvisoryBundle {
            advisory_hi: localized(Language::Hindi),
            advisory_mr: localized(Language::Marathi),
            advisory_en,
        }
    }

    fn join_clauses(&self, risk: &RiskSummary, language: Language) -> String {
        RiskDimension::ALL
            .into_iter()
            .filter_map(|dimension| self.table.clause(dimension, risk.level(dimension), language))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(flood: RiskLevel, heat: RiskLevel, storm: RiskLevel) -> RiskSummary {
        RiskSummary {
            flood,
            heat,
            storm,
            max_temp: 0.0,
            max_wind: 0.0,
        }
    }

    fn clause(dimension: RiskDimension, level: RiskLevel, language: Language) -> String {
        ClauseTable::default()
            .clause(dimension, level, language)
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_flood_high_is_localized() {
        use RiskLevel::{High, Low};
        let bundle = AdvisoryComposer::default().compose(&summary(High, Low, Low));

        assert_eq!(
            bundle.advisory_en,
            clause(RiskDimension::Flood, High, Language::English)
        );
        assert_eq!(
            bundle.advisory_hi,
            clause(RiskDimension::Flood, High, Language::Hindi)
        );
        assert_eq!(
            bundle.advisory_mr,
            clause(RiskDimension::Flood, High, Language::Marathi)
        );
        assert_ne!(bundle.advisory_hi, bundle.advisory_en);
    }

    #[test]
    fn test_english_only_configuration_falls_back_wholesale() {
        use RiskLevel::{Low, Medium};
        let bundle = AdvisoryComposer::default().compose(&summary(Low, Low, Medium));

        assert_eq!(
            bundle.advisory_en,
            "Flood risk is low — normal conditions. Moderate winds — be cautious while working at heights."
        );
        assert_eq!(bundle.advisory_hi, bundle.advisory_en);
        assert_eq!(bundle.advisory_mr, bundle.advisory_en);
    }

    #[test]
    fn test_all_low_gives_normal_conditions() {
        use RiskLevel::Low;
        let bundle = AdvisoryComposer::default().compose(&summary(Low, Low, Low));
        assert_eq!(bundle.advisory_en, "Flood risk is low — normal conditions.");
        assert_eq!(bundle.advisory_hi, bundle.advisory_en);
        assert_eq!(bundle.advisory_mr, bundle.advisory_en);
    }

    #[test]
    fn test_clause_order_is_flood_heat_storm() {
        use RiskLevel::{High, Medium};
        let bundle = AdvisoryComposer::default().compose(&summary(Medium, High, High));

        let expected = [
            clause(RiskDimension::Flood, Medium, Language::English),
            clause(RiskDimension::Heat, High, Language::English),
            clause(RiskDimension::Storm, High, Language::English),
        ]
        .join(" ");
        assert_eq!(bundle.advisory_en, expected);

        let expected_hi = [
            clause(RiskDimension::Flood, Medium, Language::Hindi),
            clause(RiskDimension::Heat, High, Language::Hindi),
            clause(RiskDimension::Storm, High, Language::Hindi),
        ]
        .join(" ");
        assert_eq!(bundle.advisory_hi, expected_hi);
    }

    #[test]
    fn test_partial_localization_is_not_padded_with_english() {
        // Low flood has only English, heat medium is localized
        use RiskLevel::{Low, Medium};
        let bundle = AdvisoryComposer::default().compose(&summary(Low, Medium, Medium));

        assert_eq!(
            bundle.advisory_mr,
            clause(RiskDimension::Heat, Medium, Language::Marathi)
        );
        assert!(bundle.advisory_en.starts_with("Flood risk is low"));
        assert!(bundle.advisory_en.ends_with("working at heights."));
    }

    #[test]
    fn test_compose_is_deterministic() {
        use RiskLevel::{High, Medium};
        let composer = AdvisoryComposer::default();
        let risk = summary(High, Medium, High);
        assert_eq!(composer.compose(&risk), composer.compose(&risk));
    }

    #[test]
    fn test_custom_table() {
        let table = ClauseTable::empty()
            .with_clause(
                RiskDimension::Storm,
                RiskLevel::Medium,
                Language::Hindi,
                "मध्यम हवा",
            )
            .with_clause(
                RiskDimension::Storm,
                RiskLevel::Medium,
                Language::English,
                "Moderate wind.",
            );
        let composer = AdvisoryComposer::new(table);
        let bundle = composer.compose(&summary(RiskLevel::Low, RiskLevel::Low, RiskLevel::Medium));

        assert_eq!(bundle.advisory_en, "Moderate wind.");
        assert_eq!(bundle.advisory_hi, "मध्यम हवा");
        assert_eq!(bundle.advisory_mr, "Moderate wind.");
    }
}
