//! Startup validation for screening configuration
//!
//! Runs before the server binds so a broken calibration never serves
//! traffic. Performs:
//! - Scoring calibration checks (categories, weights, thresholds)
//! - Crisis lexicon checks
//! - Bundle coverage checks per supported language
//!
//! Findings carry a severity; only Critical findings block startup.

use super::ScreeningConfig;
use mindcare_core::Language;
use std::collections::HashSet;

/// Severity of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    /// Informational, startup proceeds.
    Warning,
    /// Likely misconfiguration, startup proceeds.
    Error,
    /// Blocks startup.
    Critical,
}

/// A single validation finding.
#[derive(Debug, Clone)]
pub struct ValidationFinding {
    pub severity: ValidationSeverity,
    /// Config section or field the finding refers to.
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}: {}", self.severity, self.field, self.message)
    }
}

/// Validation outcome.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub findings: Vec<ValidationFinding>,
}

impl ValidationReport {
    fn add(&mut self, severity: ValidationSeverity, field: &str, message: impl Into<String>) {
        self.findings.push(ValidationFinding {
            severity,
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// Check if validation passed (no critical findings).
    pub fn is_ok(&self) -> bool {
        !self
            .findings
            .iter()
            .any(|f| f.severity == ValidationSeverity::Critical)
    }

    fn count(&self, severity: ValidationSeverity) -> usize {
        self.findings.iter().filter(|f| f.severity == severity).count()
    }

    /// Summary line for startup logs.
    pub fn summary(&self) -> String {
        if self.findings.is_empty() {
            "Screening config: all validations passed".to_string()
        } else {
            format!(
                "Screening config: {} critical, {} errors, {} warnings",
                self.count(ValidationSeverity::Critical),
                self.count(ValidationSeverity::Error),
                self.count(ValidationSeverity::Warning),
            )
        }
    }
}

/// Screening config validator.
#[derive(Debug, Default)]
pub struct ScreeningValidator;

impl ScreeningValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a screening configuration.
    pub fn validate(&self, config: &ScreeningConfig) -> ValidationReport {
        let mut report = ValidationReport::default();

        self.validate_scoring(config, &mut report);
        self.validate_crisis(config, &mut report);
        self.validate_bundles(config, &mut report);

        report
    }

    fn validate_scoring(&self, config: &ScreeningConfig, report: &mut ValidationReport) {
        let scoring = &config.scoring;

        if scoring.categories.is_empty() {
            report.add(
                ValidationSeverity::Critical,
                "scoring.categories",
                "No keyword categories defined",
            );
            return;
        }

        let mut seen = HashSet::new();
        for category in &scoring.categories {
            let field = format!("scoring.categories.{}", category.name);

            if category.name.is_empty() {
                report.add(
                    ValidationSeverity::Error,
                    "scoring.categories",
                    "Category with empty name",
                );
            } else if !seen.insert(category.name.as_str()) {
                report.add(
                    ValidationSeverity::Error,
                    &field,
                    "Duplicate category name",
                );
            }

            if category.phrases.is_empty() {
                report.add(ValidationSeverity::Error, &field, "Category has no phrases");
            }
            if category.phrases.iter().any(|p| p.trim().is_empty()) {
                report.add(
                    ValidationSeverity::Critical,
                    &field,
                    "Empty phrase matches every input",
                );
            }
            if category.weight == 0 {
                report.add(
                    ValidationSeverity::Warning,
                    &field,
                    "Zero weight, category never contributes",
                );
            }
        }

        if scoring.thresholds.low_max >= scoring.thresholds.medium_max {
            report.add(
                ValidationSeverity::Critical,
                "scoring.thresholds",
                format!(
                    "low_max ({}) must be below medium_max ({}), medium band is unreachable",
                    scoring.thresholds.low_max, scoring.thresholds.medium_max
                ),
            );
        }
    }

    fn validate_crisis(&self, config: &ScreeningConfig, report: &mut ValidationReport) {
        let crisis = &config.crisis;

        if crisis.phrases.is_empty() {
            report.add(
                ValidationSeverity::Critical,
                "crisis.phrases",
                "Empty lexicon, crisis detection would never trigger",
            );
            return;
        }

        if crisis.phrases.iter().any(|p| p.trim().is_empty()) {
            report.add(
                ValidationSeverity::Critical,
                "crisis.phrases",
                "Empty phrase turns every request into a crisis",
            );
        }
    }

    fn validate_bundles(&self, config: &ScreeningConfig, report: &mut ValidationReport) {
        let bundles = &config.bundles;
        let default_lang = config.default_language;

        if !bundles.bundles.contains_key(&default_lang) {
            report.add(
                ValidationSeverity::Critical,
                "bundles",
                format!(
                    "No bundle for default language '{}', fallback has nothing to serve",
                    default_lang
                ),
            );
        }

        for lang in Language::all() {
            if *lang != default_lang && !bundles.bundles.contains_key(lang) {
                report.add(
                    ValidationSeverity::Warning,
                    "bundles",
                    format!("No bundle for '{}', responses fall back to '{}'", lang, default_lang),
                );
            }
        }

        for (lang, bundle) in &bundles.bundles {
            let field = format!("bundles.{}", lang);
            if bundle.crisis_message.trim().is_empty() {
                report.add(ValidationSeverity::Critical, &field, "Empty crisis message");
            }
            if bundle.strategies.is_empty() {
                report.add(ValidationSeverity::Error, &field, "No coping strategies");
            }
        }

        if bundles.hotlines.is_empty() {
            report.add(
                ValidationSeverity::Warning,
                "bundles.hotlines",
                "No hotlines configured for crisis responses",
            );
        }
    }
}
