//! Container resolution: find the page and block a new question goes into.
//!
//! Resolve-or-default: an omitted ID picks the first page/block, creating
//! one when there is none. A supplied ID that doesn't match fails with
//! `NotFound`; it never falls back to a default.
//!
//! Resolution runs in two steps. [`plan`] reads the survey and decides, per
//! level, "use existing index" or "create". [`apply`] then performs any
//! creation. Every failure happens in `plan`, so a miss leaves the survey
//! untouched.

use enquete_types::{Block, BlockId, Page, PageId, Survey};

use crate::config::Defaults;
use crate::error::{Entity, SurveyError, SurveyResult};

/// Where one level of the tree resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    Existing(usize),
    Create,
}

/// Result of [`plan`]: what [`apply`] needs to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub page: Slot,
    pub block: Slot,
}

/// A resolved insertion target.
#[derive(Debug)]
pub struct Container<'a> {
    pub page_id: PageId,
    pub block: &'a mut Block,
}

/// Resolve only the page level.
pub fn plan_page(survey: &Survey, page_id: Option<&PageId>) -> SurveyResult<Slot> {
    match page_id {
        Some(id) => survey.page_index(id).map(Slot::Existing).ok_or_else(|| {
            tracing::warn!(survey_id = %survey.id, page_id = %id, "Page not found");
            SurveyError::not_found(Entity::Page, id)
        }),
        None if survey.pages.is_empty() => Ok(Slot::Create),
        None => Ok(Slot::Existing(0)),
    }
}

/// Decide where an insertion lands without touching the survey.
pub fn plan(
    survey: &Survey,
    page_id: Option<&PageId>,
    block_id: Option<&BlockId>,
) -> SurveyResult<Placement> {
    let page = plan_page(survey, page_id)?;

    // A page that doesn't exist yet has no blocks.
    let blocks: &[Block] = match page {
        Slot::Existing(i) => &survey.pages[i].blocks,
        Slot::Create => &[],
    };

    let block = match block_id {
        Some(id) => blocks
            .iter()
            .position(|b| &b.id == id)
            .map(Slot::Existing)
            .ok_or_else(|| {
                tracing::warn!(survey_id = %survey.id, block_id = %id, "Block not found");
                SurveyError::not_found(Entity::Block, id)
            })?,
        None if blocks.is_empty() => Slot::Create,
        None => Slot::Existing(0),
    };

    Ok(Placement { page, block })
}

/// Materialize the page level of a plan, returning its index.
pub fn apply_page(survey: &mut Survey, slot: Slot, defaults: &Defaults) -> usize {
    match slot {
        Slot::Existing(i) => i,
        Slot::Create => {
            let page = Page::new(defaults.page_title.clone());
            tracing::debug!(survey_id = %survey.id, page_id = %page.id, "Synthesized default page");
            survey.pages.push(page);
            survey.pages.len() - 1
        }
    }
}

/// Materialize a plan, creating default containers as needed.
pub fn apply<'a>(
    survey: &'a mut Survey,
    placement: Placement,
    defaults: &Defaults,
) -> Container<'a> {
    let page_idx = apply_page(survey, placement.page, defaults);
    let survey_id = survey.id.clone();
    let page = &mut survey.pages[page_idx];

    let block_idx = match placement.block {
        Slot::Existing(i) => i,
        Slot::Create => {
            let block = Block::new(defaults.block_title.clone());
            tracing::debug!(
                survey_id = %survey_id,
                page_id = %page.id,
                block_id = %block.id,
                "Synthesized default block"
            );
            page.blocks.push(block);
            page.blocks.len() - 1
        }
    };

    Container {
        page_id: page.id.clone(),
        block: &mut page.blocks[block_idx],
    }
}

/// Resolve the target page and block for an insertion.
pub fn resolve_container<'a>(
    survey: &'a mut Survey,
    page_id: Option<&PageId>,
    block_id: Option<&BlockId>,
    defaults: &Defaults,
) -> SurveyResult<Container<'a>> {
    let placement = plan(survey, page_id, block_id)?;
    Ok(apply(survey, placement, defaults))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bootstrapped() -> Survey {
        let mut survey = Survey::new("S", None);
        let mut page = Page::new("Page 1");
        page.blocks.push(Block::new("Block 1"));
        survey.pages.push(page);
        survey
    }

    #[test]
    fn test_defaults_pick_first_page_and_block() {
        let mut survey = bootstrapped();
        survey.pages.push(Page::new("second"));
        let first_block = survey.pages[0].blocks[0].id.clone();

        let placement = plan(&survey, None, None).unwrap();
        assert_eq!(placement, Placement { page: Slot::Existing(0), block: Slot::Existing(0) });

        let c = resolve_container(&mut survey, None, None, &Defaults::default()).unwrap();
        assert_eq!(c.block.id, first_block);
    }

    #[test]
    fn test_empty_survey_synthesizes_page_and_block() {
        let mut survey = Survey::new("bare", None);
        let c = resolve_container(&mut survey, None, None, &Defaults::default()).unwrap();
        assert_eq!(c.block.title, "Block 1");
        assert!(!c.block.randomization.enabled);
        let page_id = c.page_id.clone();

        assert_eq!(survey.pages.len(), 1);
        assert_eq!(survey.pages[0].title, "Page 1");
        assert_eq!(survey.pages[0].id, page_id);
        assert_eq!(survey.pages[0].blocks.len(), 1);
    }

    #[test]
    fn test_page_without_blocks_gets_default_block() {
        let mut survey = bootstrapped();
        let page = Page::new("empty");
        let page_id = page.id.clone();
        survey.pages.push(page);

        let defaults = Defaults {
            page_title: "P".into(),
            block_title: "Custom block".into(),
        };
        let c = resolve_container(&mut survey, Some(&page_id), None, &defaults).unwrap();
        assert_eq!(c.page_id, page_id);
        assert_eq!(c.block.title, "Custom block");
        assert_eq!(survey.pages[1].blocks.len(), 1);
    }

    #[test]
    fn test_explicit_block_on_explicit_page() {
        let mut survey = bootstrapped();
        let extra = Block::new("extra");
        let extra_id = extra.id.clone();
        survey.pages[0].blocks.push(extra);
        let page_id = survey.pages[0].id.clone();

        let c = resolve_container(&mut survey, Some(&page_id), Some(&extra_id), &Defaults::default())
            .unwrap();
        assert_eq!(c.block.id, extra_id);
    }

    #[test]
    fn test_missing_page_fails_without_mutation() {
        let mut survey = bootstrapped();
        let before = survey.clone();
        let err = resolve_container(
            &mut survey,
            Some(&PageId::from("nonexistent")),
            None,
            &Defaults::default(),
        )
        .unwrap_err();
        assert!(err.is_not_found(Entity::Page));
        assert_eq!(survey, before);
    }

    #[test]
    fn test_missing_block_fails_without_mutation() {
        let mut survey = bootstrapped();
        let before = survey.clone();
        let err = resolve_container(
            &mut survey,
            None,
            Some(&BlockId::from("block_nope")),
            &Defaults::default(),
        )
        .unwrap_err();
        assert!(err.is_not_found(Entity::Block));
        assert_eq!(survey, before);
    }

    #[test]
    fn test_block_id_on_empty_survey_does_not_create_page() {
        let mut survey = Survey::new("bare", None);
        let err = resolve_container(
            &mut survey,
            None,
            Some(&BlockId::from("block_x")),
            &Defaults::default(),
        )
        .unwrap_err();
        assert!(err.is_not_found(Entity::Block));
        assert!(survey.pages.is_empty());
    }

    #[test]
    fn test_block_lookup_is_scoped_to_resolved_page() {
        let mut survey = bootstrapped();
        let mut second = Page::new("second");
        let other = Block::new("other");
        let other_id = other.id.clone();
        second.blocks.push(other);
        survey.pages.push(second);

        // No page_id resolves to the first page, which doesn't hold `other`.
        let err = plan(&survey, None, Some(&other_id)).unwrap_err();
        assert!(err.is_not_found(Entity::Block));
    }

    /// Collects formatted log output for assertions.
    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn with_logs(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_misses_are_logged_at_warn() {
        let survey = bootstrapped();
        let logs = with_logs(|| {
            assert!(plan_page(&survey, Some(&PageId::from("page_gone"))).is_err());
        });
        assert!(logs.contains("WARN"));
        assert!(logs.contains("Page not found"));
        assert!(logs.contains("page_gone"));

        let logs = with_logs(|| {
            assert!(plan(&survey, None, Some(&BlockId::from("block_gone"))).is_err());
        });
        assert!(logs.contains("Block not found"));
        assert!(logs.contains("block_gone"));

        // Defaults resolving cleanly log nothing at warn.
        let logs = with_logs(|| {
            assert!(plan(&survey, None, None).is_ok());
        });
        assert!(logs.is_empty());
    }
}
