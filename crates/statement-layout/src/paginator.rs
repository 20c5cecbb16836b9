//! Pagination of a statement document into a render plan
//!
//! Events are chunked into fixed-capacity pages. The first page carries the
//! header block and introduction, later pages a continued-page title, and
//! only the last rendered page the closing section. Plan policy is applied
//! here: free plans get a single watermarked page, paid plans may be capped
//! with `max_pages`.

use crate::config::{LayoutConfig, DEFAULT_PAGE_CAPACITY};
use crate::output::suggest_file_name;
use shared_types::{
    ClosingSection, HeaderBlock, NormalizedEvent, PlanPolicy, RenderPage, RenderPlan,
    StatementDocument,
};

/// Splits statement documents into pages
#[derive(Debug, Clone, Default)]
pub struct Paginator {
    config: LayoutConfig,
}

impl Paginator {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Paginate using the policy attached to the document
    pub fn paginate_document(
        &self,
        document: &StatementDocument,
        page_capacity: Option<usize>,
    ) -> RenderPlan {
        self.paginate(document, page_capacity, &document.plan_policy)
    }

    /// Build the render plan for `document` under `policy`
    pub fn paginate(
        &self,
        document: &StatementDocument,
        page_capacity: Option<usize>,
        policy: &PlanPolicy,
    ) -> RenderPlan {
        let capacity = self.resolve_capacity(page_capacity);

        let mut chunks: Vec<&[NormalizedEvent]> = document.events.chunks(capacity).collect();
        if chunks.is_empty() {
            // A statement always has a first page, even with no events
            chunks.push(&[]);
        }

        let available = chunks.len();
        if let Some(limit) = page_limit(policy) {
            chunks.truncate(limit);
        }
        let truncated = chunks.len() < available;

        let watermark = self.watermark(policy);
        let last_index = chunks.len() - 1;
        let pages: Vec<RenderPage> = chunks
            .iter()
            .enumerate()
            .map(|(index, rows)| self.page(document, index, index == last_index, rows, &watermark))
            .collect();

        let rendered_events: usize = pages.iter().map(|p| p.rows.len()).sum();

        tracing::info!(
            capacity,
            pages = pages.len(),
            total_events = document.events.len(),
            rendered_events,
            truncated,
            free_plan = policy.is_free_plan,
            "paginated statement"
        );

        RenderPlan {
            pages,
            columns: self.config.columns.clone(),
            evidence_mark: self.config.evidence_mark.clone(),
            total_events: document.events.len(),
            rendered_events,
            truncated,
            suggested_file_name: suggest_file_name(
                &self.config,
                document.header.issued_on,
                policy.is_free_plan,
            ),
        }
    }

    fn resolve_capacity(&self, requested: Option<usize>) -> usize {
        let configured = if self.config.page_capacity == 0 {
            tracing::warn!("configured page capacity is zero, using default");
            DEFAULT_PAGE_CAPACITY
        } else {
            self.config.page_capacity
        };

        match requested {
            Some(0) => {
                tracing::warn!(fallback = configured, "page capacity of zero requested");
                configured
            }
            Some(capacity) => capacity,
            None => configured,
        }
    }

    fn watermark(&self, policy: &PlanPolicy) -> Option<String> {
        if !policy.is_free_plan {
            return None;
        }
        let text = policy
            .watermark_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.config.free_watermark);
        Some(text.to_string())
    }

    fn page(
        &self,
        document: &StatementDocument,
        index: usize,
        is_last: bool,
        rows: &[NormalizedEvent],
        watermark: &Option<String>,
    ) -> RenderPage {
        let is_first = index == 0;
        let header = &document.header;

        RenderPage {
            page_number: index + 1,
            is_first,
            is_last,
            title: (!is_first).then(|| self.config.continued_title.clone()),
            header_block: is_first.then(|| HeaderBlock {
                title: self.config.title.clone(),
                court: header.court_placeholder.clone(),
                issue_date: header.issue_date.clone(),
                author: header.author_name.clone(),
            }),
            intro_block: (is_first && !document.introduction.is_empty())
                .then(|| document.introduction.clone()),
            rows: rows.to_vec(),
            closing_section: is_last.then(|| ClosingSection {
                heading: self.config.closing_heading.clone(),
                hint: self.config.closing_hint.clone(),
            }),
            watermark: watermark.clone(),
        }
    }
}

/// Maximum number of pages the policy allows, if any
fn page_limit(policy: &PlanPolicy) -> Option<usize> {
    if policy.is_free_plan {
        return Some(1);
    }
    policy.max_pages.map(|max| max.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use shared_types::StatementHeader;

    fn event(n: usize) -> NormalizedEvent {
        NormalizedEvent {
            date: format!("Day {}", n),
            time: String::new(),
            location: String::new(),
            category: String::new(),
            detail: format!("Event {}.", n),
            evidence: n % 2 == 0,
            attachments: vec![],
            occurred_at: Utc.timestamp_opt(n as i64 * 60, 0).unwrap(),
        }
    }

    fn document(count: usize) -> StatementDocument {
        StatementDocument {
            header: StatementHeader {
                issue_date: "October 19, 2026".to_string(),
                issued_on: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
                court_placeholder: "To the ________ Family Court".to_string(),
                author_name: "A. Petitioner".to_string(),
            },
            introduction: "Introduction.".to_string(),
            events: (0..count).map(event).collect(),
            plan_policy: PlanPolicy::full(),
        }
    }

    #[test]
    fn test_twenty_events_make_two_pages() {
        let plan = Paginator::default().paginate_document(&document(20), Some(14));

        assert_eq!(plan.page_count(), 2);
        assert_eq!(plan.pages[0].rows.len(), 14);
        assert_eq!(plan.pages[1].rows.len(), 6);
        assert!(plan.pages[0].header_block.is_some());
        assert_eq!(plan.pages[0].intro_block.as_deref(), Some("Introduction."));
        assert!(plan.pages[0].closing_section.is_none());
        assert_eq!(
            plan.pages[1].title.as_deref(),
            Some("WRITTEN STATEMENT (continued)")
        );
        assert!(plan.pages[1].header_block.is_none());
        assert!(plan.pages[1].closing_section.is_some());
        assert!(!plan.truncated);
        assert_eq!(plan.rendered_events, 20);
        assert_eq!(plan.suggested_file_name, "written-statement-2026-10-19.pdf");
    }

    #[test]
    fn test_page_order_preserves_event_order() {
        let plan = Paginator::default().paginate_document(&document(30), Some(7));
        let details: Vec<&str> = plan.rows().map(|e| e.detail.as_str()).collect();
        let expected: Vec<String> = (0..30).map(|n| format!("Event {}.", n)).collect();
        assert_eq!(details, expected.iter().map(String::as_str).collect::<Vec<_>>());
        assert_eq!(
            plan.pages.iter().map(|p| p.page_number).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5]
        );
    }

    #[test]
    fn test_no_events_still_renders_one_page() {
        let plan = Paginator::default().paginate_document(&document(0), None);
        assert_eq!(plan.page_count(), 1);
        let page = &plan.pages[0];
        assert!(page.is_first && page.is_last);
        assert!(page.header_block.is_some());
        assert!(page.closing_section.is_some());
        assert!(page.rows.is_empty());
    }

    #[test]
    fn test_default_capacity() {
        let plan = Paginator::default().paginate_document(&document(15), None);
        assert_eq!(plan.page_count(), 2);
        assert_eq!(plan.pages[0].rows.len(), DEFAULT_PAGE_CAPACITY);
    }

    #[test]
    fn test_zero_capacity_falls_back() {
        let plan = Paginator::default().paginate_document(&document(15), Some(0));
        assert_eq!(plan.pages[0].rows.len(), DEFAULT_PAGE_CAPACITY);

        let paginator = Paginator::new(LayoutConfig {
            page_capacity: 0,
            ..LayoutConfig::default()
        });
        let plan = paginator.paginate_document(&document(15), None);
        assert_eq!(plan.pages[0].rows.len(), DEFAULT_PAGE_CAPACITY);
    }

    #[test]
    fn test_free_plan_single_watermarked_page() {
        let doc = document(20).with_policy(PlanPolicy::free("SAMPLE"));
        let plan = Paginator::default().paginate_document(&doc, Some(14));

        assert_eq!(plan.page_count(), 1);
        let page = &plan.pages[0];
        assert_eq!(page.watermark.as_deref(), Some("SAMPLE"));
        assert!(page.is_last);
        assert!(page.closing_section.is_some());
        assert!(plan.truncated);
        assert_eq!(plan.total_events, 20);
        assert_eq!(plan.rendered_events, 14);
        assert_eq!(
            plan.suggested_file_name,
            "written-statement-preview-2026-10-19.pdf"
        );
    }

    #[test]
    fn test_free_plan_without_text_uses_layout_watermark() {
        let policy = PlanPolicy {
            is_free_plan: true,
            watermark_text: None,
            max_pages: None,
        };
        let plan = Paginator::default().paginate(&document(3), None, &policy);
        assert_eq!(plan.pages[0].watermark.as_deref(), Some("FREE PLAN PREVIEW"));
        assert!(!plan.truncated);
    }

    #[test]
    fn test_paid_plan_has_no_watermark() {
        let policy = PlanPolicy {
            is_free_plan: false,
            watermark_text: Some("ignored".to_string()),
            max_pages: None,
        };
        let plan = Paginator::default().paginate(&document(30), Some(10), &policy);
        assert!(plan.pages.iter().all(|p| p.watermark.is_none()));
    }

    #[test]
    fn test_max_pages_caps_paid_plan() {
        let policy = PlanPolicy {
            max_pages: Some(2),
            ..PlanPolicy::full()
        };
        let plan = Paginator::default().paginate(&document(50), Some(10), &policy);
        assert_eq!(plan.page_count(), 2);
        assert!(plan.truncated);
        assert!(plan.pages[1].is_last);
        assert!(plan.pages[1].closing_section.is_some());
        assert_eq!(plan.rendered_events, 20);
    }

    #[test]
    fn test_japanese_layout_strings() {
        let paginator = Paginator::new(LayoutConfig::japanese());
        let plan = paginator.paginate_document(&document(20), Some(14));
        assert_eq!(plan.pages[1].title.as_deref(), Some("陳 述 書（続き）"));
        assert_eq!(
            plan.pages[0].header_block.as_ref().map(|h| h.title.as_str()),
            Some("陳 述 書")
        );
        assert_eq!(plan.evidence_mark, "有");
    }

    proptest! {
        #[test]
        fn prop_page_count_is_ceiling(count in 0usize..120, capacity in 1usize..30) {
            let plan = Paginator::default().paginate_document(&document(count), Some(capacity));
            let expected = count.div_ceil(capacity).max(1);
            prop_assert_eq!(plan.page_count(), expected);
            prop_assert_eq!(plan.rendered_events, count);
            prop_assert!(plan.pages.iter().all(|p| p.rows.len() <= capacity));
            prop_assert_eq!(plan.pages.iter().filter(|p| p.closing_section.is_some()).count(), 1);
            prop_assert_eq!(plan.pages.iter().filter(|p| p.header_block.is_some()).count(), 1);
        }

        #[test]
        fn prop_free_plan_never_exceeds_one_page(count in 0usize..120, capacity in 1usize..30) {
            let doc = document(count).with_policy(PlanPolicy::free("FREE"));
            let plan = Paginator::default().paginate_document(&doc, Some(capacity));
            prop_assert_eq!(plan.page_count(), 1);
            prop_assert!(plan.pages.iter().all(|p| p.watermark.as_deref() == Some("FREE")));
            prop_assert_eq!(plan.truncated, count > capacity);
        }
    }
}
