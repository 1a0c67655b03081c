//! Keyword-driven urgency analyzer

use std::collections::BTreeMap;

use serde::Serialize;

use super::keywords::KeywordTable;
use super::{phrase_positions, tokenize, UrgencyTier};
use crate::config::AnalyzerSettings;
use crate::error::Result;

/// Keyword from the table that matched a ticket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordHit {
    /// Keyword text as written in the table
    pub phrase: String,
    /// Tier the keyword belongs to
    pub tier: UrgencyTier,
    /// Weight added to the tier total after negation
    pub weight: f64,
    /// True when every occurrence was preceded by a negation marker
    pub negated: bool,
}

/// Result of analyzing one ticket text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorityAssessment {
    /// Winning urgency tier
    pub tier: UrgencyTier,
    /// Urgency score, higher is more urgent
    pub score: f64,
    /// Accumulated weight per tier before boosts
    pub tier_totals: BTreeMap<UrgencyTier, f64>,
    /// Matched keywords in table order
    pub matched_keywords: Vec<KeywordHit>,
    /// Impact multiplier applied to the score (1.0 when none matched)
    pub impact_multiplier: f64,
    /// Whether the corroboration boost was applied
    pub corroborated: bool,
    /// Human-readable explanation
    pub rationale: String,
}

impl PriorityAssessment {
    /// Assessment supplied by a caller instead of derived from text
    ///
    /// Used when urgency was decided upstream, for example by a human
    /// triager overriding the analyzer.
    pub fn manual(tier: UrgencyTier, score: f64) -> Self {
        let mut tier_totals: BTreeMap<UrgencyTier, f64> =
            UrgencyTier::ALL.iter().map(|tier| (*tier, 0.0)).collect();
        tier_totals.insert(tier, score);
        Self {
            tier,
            score,
            tier_totals,
            matched_keywords: Vec::new(),
            impact_multiplier: 1.0,
            corroborated: false,
            rationale: format!("Manually set {} priority (Priority score: {:.1}).", tier, score),
        }
    }

    /// True when no keyword matched and the baseline was used
    pub fn is_baseline(&self) -> bool {
        self.matched_keywords.is_empty()
    }
}

/// Number of tickets per urgency tier
pub type TierDistribution = BTreeMap<UrgencyTier, usize>;

#[derive(Debug, Clone)]
struct CompiledPhrase {
    phrase: String,
    tokens: Vec<String>,
    weight: f64,
}

/// # Urgency Analyzer
///
/// Classifies ticket text into an [`UrgencyTier`] with a numeric score. The
/// analyzer owns an immutable copy of its keyword table and settings; it has
/// no other state, so `analyze` is a pure function of its input and the
/// analyzer is freely shareable across threads.
///
/// ## Rules
///
/// - Each distinct keyword contributes its weight once to its tier. A keyword
///   whose every occurrence follows a negation marker ("not", "no longer")
///   contributes only `negation_factor` of its weight.
/// - The tier with the largest total wins; ties go to the more severe tier.
///   With `escalate_on_critical`, any non-negated CRITICAL keyword wins
///   outright.
/// - Score is the winning total, times `corroboration_multiplier` when two
///   or more distinct non-negated keywords of that tier matched, times the
///   strongest matched impact multiplier.
/// - No match gives MEDIUM with `baseline_score`.
///
/// ## Examples
///
/// ```rust
/// use helpdesk_assign_engine::config::AnalyzerSettings;
/// use helpdesk_assign_engine::priority::{KeywordTable, PriorityAnalyzer, UrgencyTier};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let table = KeywordTable::empty()
///     .with_keyword(UrgencyTier::Critical, "outage", 10.0)
///     .with_keyword(UrgencyTier::High, "broken", 6.0)
///     .with_keyword(UrgencyTier::Medium, "question", 2.0)
///     .with_keyword(UrgencyTier::Low, "suggestion", 1.0);
///
/// let analyzer = PriorityAnalyzer::new(table, AnalyzerSettings::default())?;
///
/// let outage = analyzer.analyze("Mail outage in the Oslo office");
/// assert_eq!(outage.tier, UrgencyTier::Critical);
/// assert_eq!(outage.score, 10.0);
///
/// let unknown = analyzer.analyze("Printer toner");
/// assert_eq!(unknown.tier, UrgencyTier::Medium);
/// assert_eq!(unknown.score, 2.0);
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct PriorityAnalyzer {
    table: KeywordTable,
    settings: AnalyzerSettings,
    keywords: Vec<(UrgencyTier, Vec<CompiledPhrase>)>,
    impact: Vec<CompiledPhrase>,
    negation_markers: Vec<Vec<String>>,
}

impl PriorityAnalyzer {
    /// Build an analyzer from a keyword table and settings
    ///
    /// Fails with a configuration error if the table has an empty tier or a
    /// bad weight, or the settings are out of range.
    pub fn new(table: KeywordTable, settings: AnalyzerSettings) -> Result<Self> {
        table.validate()?;
        settings.validate()?;

        let keywords = UrgencyTier::ALL
            .iter()
            .map(|tier| {
                let compiled = table
                    .tier(*tier)
                    .iter()
                    .map(|keyword| CompiledPhrase {
                        phrase: keyword.phrase.clone(),
                        tokens: tokenize(&keyword.phrase),
                        weight: keyword.weight,
                    })
                    .collect();
                (*tier, compiled)
            })
            .collect();

        let impact = table
            .impact
            .iter()
            .map(|impact| CompiledPhrase {
                phrase: impact.phrase.clone(),
                tokens: tokenize(&impact.phrase),
                weight: impact.multiplier,
            })
            .collect();

        let negation_markers = settings
            .negation_markers
            .iter()
            .map(|marker| tokenize(marker))
            .collect();

        Ok(Self {
            table,
            settings,
            keywords,
            impact,
            negation_markers,
        })
    }

    /// Analyzer over [`KeywordTable::standard`] with default settings
    pub fn standard() -> Self {
        Self::new(KeywordTable::standard(), AnalyzerSettings::default())
            .expect("standard keyword table and default settings are valid")
    }

    /// Keyword table in use
    pub fn table(&self) -> &KeywordTable {
        &self.table
    }

    /// Settings in use
    pub fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }

    /// Analyze a single ticket text
    pub fn analyze(&self, text: &str) -> PriorityAssessment {
        let tokens = tokenize(text);

        let mut tier_totals: BTreeMap<UrgencyTier, f64> =
            UrgencyTier::ALL.iter().map(|tier| (*tier, 0.0)).collect();
        let mut matched_keywords = Vec::new();

        for (tier, phrases) in &self.keywords {
            for keyword in phrases {
                let positions = phrase_positions(&tokens, &keyword.tokens);
                if positions.is_empty() {
                    continue;
                }

                let negated = positions.iter().all(|start| self.is_negated(&tokens, *start));
                let weight = if negated {
                    keyword.weight * self.settings.negation_factor
                } else {
                    keyword.weight
                };

                *tier_totals.entry(*tier).or_insert(0.0) += weight;
                matched_keywords.push(KeywordHit {
                    phrase: keyword.phrase.clone(),
                    tier: *tier,
                    weight,
                    negated,
                });
            }
        }

        let impact_multiplier = if self.settings.apply_impact_multipliers {
            self.impact
                .iter()
                .filter(|impact| !phrase_positions(&tokens, &impact.tokens).is_empty())
                .map(|impact| impact.weight)
                .fold(1.0_f64, f64::max)
        } else {
            1.0
        };

        let Some(tier) = self.winning_tier(&tier_totals, &matched_keywords) else {
            let score = self.settings.baseline_score;
            let rationale = format!(
                "Assigned {} priority by default: no urgency indicators found (Priority score: {:.1}).",
                UrgencyTier::Medium,
                score
            );
            return PriorityAssessment {
                tier: UrgencyTier::Medium,
                score,
                tier_totals,
                matched_keywords,
                impact_multiplier: 1.0,
                corroborated: false,
                rationale,
            };
        };

        let supporting = matched_keywords
            .iter()
            .filter(|hit| hit.tier == tier && !hit.negated)
            .count();
        let corroborated = supporting >= 2;

        let mut score = tier_totals.get(&tier).copied().unwrap_or(0.0);
        if corroborated {
            score *= self.settings.corroboration_multiplier;
        }
        score *= impact_multiplier;

        let rationale = Self::rationale(tier, score, &matched_keywords, impact_multiplier);

        PriorityAssessment {
            tier,
            score,
            tier_totals,
            matched_keywords,
            impact_multiplier,
            corroborated,
            rationale,
        }
    }

    /// Count tickets per tier over a batch of texts
    ///
    /// Every tier is present in the result, possibly with a zero count.
    pub fn distribution<'a, I>(&self, texts: I) -> TierDistribution
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut distribution: TierDistribution =
            UrgencyTier::ALL.iter().map(|tier| (*tier, 0)).collect();
        for text in texts {
            *distribution.entry(self.analyze(text).tier).or_insert(0) += 1;
        }
        distribution
    }

    fn is_negated(&self, tokens: &[String], start: usize) -> bool {
        self.negation_markers.iter().any(|marker| {
            marker.len() <= start && tokens[start - marker.len()..start] == marker[..]
        })
    }

    fn winning_tier(
        &self,
        tier_totals: &BTreeMap<UrgencyTier, f64>,
        matched: &[KeywordHit],
    ) -> Option<UrgencyTier> {
        if self.settings.escalate_on_critical
            && matched
                .iter()
                .any(|hit| hit.tier == UrgencyTier::Critical && !hit.negated)
        {
            return Some(UrgencyTier::Critical);
        }

        // ALL is most severe first, so a strict comparison keeps the more
        // severe tier on equal totals.
        let mut best: Option<(UrgencyTier, f64)> = None;
        for tier in UrgencyTier::ALL {
            let total = tier_totals.get(&tier).copied().unwrap_or(0.0);
            if total > 0.0 && best.map_or(true, |(_, best_total)| total > best_total) {
                best = Some((tier, total));
            }
        }
        best.map(|(tier, _)| tier)
    }

    fn rationale(tier: UrgencyTier, score: f64, matched: &[KeywordHit], impact: f64) -> String {
        let mut parts = vec![format!("Assigned {} priority", tier)];

        let shown: Vec<String> = matched
            .iter()
            .filter(|hit| !hit.negated)
            .take(5)
            .map(|hit| format!("'{}'", hit.phrase))
            .collect();
        let positive = matched.iter().filter(|hit| !hit.negated).count();
        if !shown.is_empty() {
            let mut keywords = shown.join(", ");
            if positive > shown.len() {
                keywords.push_str(&format!(" and {} more", positive - shown.len()));
            }
            parts.push(format!("based on urgency indicators: {}", keywords));
        }

        let negated = matched.iter().filter(|hit| hit.negated).count();
        if negated > 0 {
            parts.push(format!("({} negated indicator(s) discounted)", negated));
        }

        if impact > 1.0 {
            parts.push(format!(
                "with {:.1}x impact multiplier for scope/business impact",
                impact
            ));
        }

        parts.push(format!("(Priority score: {:.1})", score));
        parts.join(" ") + "."
    }
}
