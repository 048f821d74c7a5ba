use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Outcome class of one inspected annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationStatus {
    Converted,
    Warned,
    Skipped,
    Ignored,
}

/// One append-only record in the per-Ingress status log. A key may have
/// several entries when a converter has several logically distinct
/// outcomes to report for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEntry {
    pub annotation: String,
    pub status: AnnotationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Status log for a single Ingress.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngressReport {
    pub name: String,
    pub namespace: String,
    pub entries: Vec<StatusEntry>,
}

/// All per-Ingress reports of one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalReport {
    pub ingresses: Vec<IngressReport>,
}

/// Aggregate counts, computed on demand from a status log. The write side
/// (reporting) never touches this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub converted: usize,
    pub warnings: usize,
    pub skipped: usize,
    pub ignored: usize,
}

impl Summary {
    pub fn of(entries: &[StatusEntry]) -> Self {
        let mut summary = Summary::default();
        for entry in entries {
            match entry.status {
                AnnotationStatus::Converted => summary.converted += 1,
                AnnotationStatus::Warned => summary.warnings += 1,
                AnnotationStatus::Skipped => summary.skipped += 1,
                AnnotationStatus::Ignored => summary.ignored += 1,
            }
        }
        summary
    }

    pub fn merge(&mut self, other: Summary) {
        self.converted += other.converted;
        self.warnings += other.warnings;
        self.skipped += other.skipped;
        self.ignored += other.ignored;
    }

    pub fn verdict(&self) -> Verdict {
        if self.skipped > 0 {
            Verdict::ManualActionRequired
        } else if self.warnings > 0 {
            Verdict::ReviewRecommended
        } else {
            Verdict::CleanMigration
        }
    }
}

impl GlobalReport {
    pub fn summary(&self) -> Summary {
        let mut total = Summary::default();
        for report in &self.ingresses {
            total.merge(Summary::of(&report.entries));
        }
        total
    }
}

/// Overall migration verdict derived from the counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    CleanMigration,
    ReviewRecommended,
    ManualActionRequired,
}

impl Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::CleanMigration => write!(f, "Clean migration"),
            Verdict::ReviewRecommended => write!(f, "Review recommended"),
            Verdict::ManualActionRequired => write!(f, "Manual action required"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn entry(status: AnnotationStatus) -> StatusEntry {
        StatusEntry {
            annotation: "nginx.ingress.kubernetes.io/ssl-redirect".to_string(),
            status,
            message: None,
        }
    }

    #[test]
    fn test_verdict_precedence() {
        let clean = Summary::of(&[entry(AnnotationStatus::Converted), entry(AnnotationStatus::Ignored)]);
        assert_eq!(clean.verdict(), Verdict::CleanMigration);

        let warned = Summary::of(&[entry(AnnotationStatus::Converted), entry(AnnotationStatus::Warned)]);
        assert_eq!(warned.verdict(), Verdict::ReviewRecommended);

        // skipped wins over warned
        let skipped = Summary::of(&[entry(AnnotationStatus::Warned), entry(AnnotationStatus::Skipped)]);
        assert_eq!(skipped.verdict(), Verdict::ManualActionRequired);
    }

    #[test]
    fn test_global_summary_accumulates() {
        let mut global = GlobalReport::default();
        global.ingresses.push(IngressReport {
            name: "a".to_string(),
            namespace: "default".to_string(),
            entries: vec![entry(AnnotationStatus::Converted)],
        });
        global.ingresses.push(IngressReport {
            name: "b".to_string(),
            namespace: "default".to_string(),
            entries: vec![entry(AnnotationStatus::Converted), entry(AnnotationStatus::Skipped)],
        });
        let total = global.summary();
        assert_eq!(total.converted, 2);
        assert_eq!(total.skipped, 1);
        assert_eq!(total.verdict(), Verdict::ManualActionRequired);
    }
}
