//! End-to-end review of synthetic Scope-of-Work documents

use pretty_assertions::assert_eq;
use review_engine::{
    AdvisoryError, Advisor, NoopAdvisor, ReferenceTemplate, ReviewEngine, Reviewer, Vocabulary,
};
use shared_types::{ExternalIssue, IssueKind, ScoringWeights, Severity, SeverityCounts};
use std::sync::Arc;

const FULL_SOW: &str = "\
PROJECT OVERVIEW
This project is for a new school building.
SCOPE OF WORK
Includes foundation, structure, and finishing.
TIMELINE
Start date: March 1, 2024
MATERIALS
Concrete and steel.
COSTS
Total cost: $1,000,000
PAYMENT TERMS
Monthly billing.
DELIVERABLES
Complete building.
QUALITY STANDARDS
ACI 318 compliance.
";

fn engine() -> ReviewEngine {
    ReviewEngine::new(
        ReferenceTemplate::construction_sow(),
        &Vocabulary::default(),
        ScoringWeights::new(10, 5, 1),
    )
    .unwrap()
}

#[test]
fn missing_legal_clauses_and_one_tbd_scores_fifteen() {
    let text = FULL_SOW.replace("Concrete and steel.", "Concrete and steel, finishes TBD.");
    let result = engine().analyze(&text);

    let kinds: Vec<_> = result.issues.iter().map(|i| (i.kind, i.severity)).collect();
    assert_eq!(
        kinds,
        vec![
            (IssueKind::MissingSection, Severity::Critical),
            (IssueKind::AmbiguousTerm, Severity::Warning),
        ]
    );
    assert_eq!(
        result.severity_counts,
        SeverityCounts {
            critical: 1,
            warning: 1,
            info: 0
        }
    );
    assert_eq!(result.risk_score, 15);
}

#[test]
fn two_tbds_yield_two_ambiguity_issues() {
    let result = engine().analyze("Budget is TBD. Completion date is TBD.");
    assert_eq!(result.issues_of(IssueKind::AmbiguousTerm).count(), 2);
}

#[test]
fn two_completion_dates_yield_one_contradiction() {
    let result =
        engine().analyze("completion date: Jan 1, 2024\nNotes.\ncompletion date: Feb 1, 2024");
    assert_eq!(result.issues_of(IssueKind::Contradiction).count(), 1);
}

#[test]
fn short_deadlines_at_page_edges_still_conflict() {
    let result = engine().analyze(
        "Deadline: 2024-05-01\nSCOPE OF WORK\nAll works.\x0CTIMELINE\nMore text here.\n\
         Deadline: 2024-06-01",
    );
    assert_eq!(result.issues_of(IssueKind::Contradiction).count(), 1);
}

#[test]
fn empty_template_yields_no_missing_sections() {
    let engine = ReviewEngine::new(
        ReferenceTemplate::new(Vec::<String>::new()),
        &Vocabulary::default(),
        ScoringWeights::default(),
    )
    .unwrap();
    let result = engine.analyze("Nothing resembling a scope of work.");
    assert_eq!(result.issues_of(IssueKind::MissingSection).count(), 0);
}

#[test]
fn multi_page_document_with_running_headers() {
    let page_one = "Riverside Hospital - SOW Rev 2\nPROJECT OVERVIEW\nNew hospital construction.\n\
        SCOPE OF WORK\nAll civil and MEP works.\nTIMELINE\nCompletion in 6 months.\nPage 1 of 2";
    let page_two = "Riverside Hospital - SOW Rev 2\nThe phases spanning 12 months may overlap.\n\
        MATERIALS\nConcrete, steel, glass.\nCOSTS\n$5,000,000.\nPAYMENT TERMS\nMonthly billing.\n\
        DELIVERABLES\nHospital building.\nQUALITY STANDARDS\nAs required.\nLEGAL CLAUSES\n\
        Standard contract terms.\nPage 2 of 2";
    let raw = format!("{}\x0C{}", page_one, page_two);

    let result = engine().analyze(&raw);
    assert_eq!(result.issues_of(IssueKind::MissingSection).count(), 0);
    assert_eq!(result.issues_of(IssueKind::Contradiction).count(), 1);
    assert_eq!(result.issues_of(IssueKind::AmbiguousTerm).count(), 1);
    assert_eq!(result.risk_score, 10 + 5);
    assert!(result.sections_found.contains(&"Legal Clauses".to_string()));
}

struct UnreachableAdvisor;

#[async_trait::async_trait]
impl Advisor for UnreachableAdvisor {
    fn name(&self) -> &str {
        "unreachable"
    }

    async fn advise(&self, _text: &str) -> Result<Vec<ExternalIssue>, AdvisoryError> {
        Err(AdvisoryError::Transport("connection refused".to_string()))
    }
}

#[tokio::test]
async fn unreachable_advisor_keeps_rule_results() {
    let engine = Arc::new(engine());
    let text = "Budget: TBD";

    let baseline = Reviewer::new(engine.clone(), Arc::new(NoopAdvisor))
        .review(text)
        .await;
    let result = Reviewer::new(engine, Arc::new(UnreachableAdvisor))
        .review(text)
        .await;

    assert!(result.llm_unavailable);
    assert_eq!(result.issues, baseline.issues);
    assert_eq!(result.risk_score, baseline.risk_score);
    assert!(result.issues.iter().all(|i| i.is_rule_based()));
}
