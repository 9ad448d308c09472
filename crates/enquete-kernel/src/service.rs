//! Survey operations: the public contract over store, resolver, and summaries.
//!
//! `SurveyService` is the context object a host creates once and passes
//! around (it's cheap to clone). Tests build a fresh one per case.

use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

use enquete_types::{
    Block, BlockId, Page, PageId, Question, QuestionAttributes, QuestionId, QuestionKind,
    QuestionType, Randomization, Survey, SurveyId, TypeDescriptor, question_type_catalog,
};

use crate::config::Defaults;
use crate::error::{Entity, SurveyError, SurveyResult};
use crate::resolve::{apply, apply_page, plan, plan_page};
use crate::store::{SharedSurveyStore, shared_survey_store};
use crate::summary::SurveySummary;

/// Input for [`SurveyService::create_survey`].
#[derive(Clone, Debug, Default)]
pub struct CreateSurvey {
    pub title: String,
    pub description: Option<String>,
}

/// Input for [`SurveyService::add_question`].
#[derive(Clone, Debug)]
pub struct AddQuestion {
    pub survey_id: SurveyId,
    pub page_id: Option<PageId>,
    pub block_id: Option<BlockId>,
    pub question_type: QuestionType,
    pub question_text: String,
    pub required: bool,
    /// Option texts, in display order.
    pub options: Vec<String>,
    pub attributes: QuestionAttributes,
}

impl AddQuestion {
    /// A required question targeting the survey's default container.
    pub fn new(
        survey_id: SurveyId,
        question_type: QuestionType,
        question_text: impl Into<String>,
    ) -> Self {
        Self {
            survey_id,
            page_id: None,
            block_id: None,
            question_type,
            question_text: question_text.into(),
            required: true,
            options: Vec::new(),
            attributes: QuestionAttributes::default(),
        }
    }

    pub fn in_page(mut self, page_id: PageId) -> Self {
        self.page_id = Some(page_id);
        self
    }

    pub fn in_block(mut self, block_id: BlockId) -> Self {
        self.block_id = Some(block_id);
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_attributes(mut self, attributes: QuestionAttributes) -> Self {
        self.attributes = attributes;
        self
    }
}

/// Input for [`SurveyService::add_block`].
#[derive(Clone, Debug)]
pub struct AddBlock {
    pub survey_id: SurveyId,
    pub page_id: Option<PageId>,
    pub title: String,
    pub randomization: Option<Randomization>,
}

/// Outcome of a creating operation.
///
/// Serializes as `{"<kind>_id": ..., "message": ...}`, keyed by the ID type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Created<T> {
    pub id: T,
    pub message: String,
}

/// Field name an ID is reported under.
pub trait IdField {
    const FIELD: &'static str;
}

impl IdField for SurveyId {
    const FIELD: &'static str = "survey_id";
}

impl IdField for PageId {
    const FIELD: &'static str = "page_id";
}

impl IdField for BlockId {
    const FIELD: &'static str = "block_id";
}

impl IdField for QuestionId {
    const FIELD: &'static str = "question_id";
}

impl<T: IdField + Serialize> Serialize for Created<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(T::FIELD, &self.id)?;
        map.serialize_entry("message", &self.message)?;
        map.end()
    }
}

/// Where `add_question` put the question.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct QuestionPlacement {
    pub page_id: PageId,
    pub block_id: BlockId,
}

fn survey_not_found(survey_id: &SurveyId) -> SurveyError {
    tracing::warn!(survey_id = %survey_id, "Survey not found");
    SurveyError::not_found(Entity::Survey, survey_id)
}

fn require_non_empty(field: &str, value: &str) -> SurveyResult<()> {
    if value.trim().is_empty() {
        return Err(SurveyError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Survey operations over a shared store.
#[derive(Clone)]
pub struct SurveyService {
    store: SharedSurveyStore,
    defaults: Arc<Defaults>,
}

impl std::fmt::Debug for SurveyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurveyService")
            .field("surveys", &self.store.len())
            .field("defaults", &self.defaults)
            .finish()
    }
}

impl Default for SurveyService {
    fn default() -> Self {
        Self::new(Defaults::default())
    }
}

impl SurveyService {
    /// Create a service with an empty in-memory store.
    pub fn new(defaults: Defaults) -> Self {
        Self::with_store(shared_survey_store(), defaults)
    }

    /// Create a service over an existing store.
    pub fn with_store(store: SharedSurveyStore, defaults: Defaults) -> Self {
        Self {
            store,
            defaults: Arc::new(defaults),
        }
    }

    pub fn store(&self) -> &SharedSurveyStore {
        &self.store
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Summaries of every survey, in creation order.
    pub fn list_surveys(&self) -> Vec<SurveySummary> {
        self.store.all().iter().map(SurveySummary::of).collect()
    }

    /// Full document for one survey.
    pub fn get_survey(&self, survey_id: &SurveyId) -> SurveyResult<Survey> {
        self.store
            .get(survey_id)
            .ok_or_else(|| survey_not_found(survey_id))
    }

    /// Summary for one survey.
    pub fn summarize(&self, survey_id: &SurveyId) -> SurveyResult<SurveySummary> {
        self.store
            .read(survey_id, SurveySummary::of)
            .ok_or_else(|| survey_not_found(survey_id))
    }

    /// The static question-type catalog.
    pub fn question_types(&self) -> Vec<TypeDescriptor> {
        question_type_catalog()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Create a survey with one default page holding one default block.
    pub fn create_survey(&self, req: CreateSurvey) -> SurveyResult<Created<SurveyId>> {
        require_non_empty("title", &req.title)?;

        let mut survey = Survey::new(req.title, req.description);
        let mut page = Page::new(self.defaults.page_title.clone());
        page.blocks.push(Block::new(self.defaults.block_title.clone()));
        survey.pages.push(page);

        let id = survey.id.clone();
        let message = format!("Survey '{}' created", survey.title);
        self.store.put(survey);

        tracing::info!(survey_id = %id, "Created survey");
        Ok(Created { id, message })
    }

    /// Append a question to the resolved container.
    pub fn add_question(&self, req: AddQuestion) -> SurveyResult<Created<QuestionId>> {
        self.add_question_placed(req)
            .map(|(created, _)| created)
    }

    /// Like [`add_question`](Self::add_question), also reporting where the
    /// question landed.
    ///
    /// The survey and container resolve before the question is built, so a
    /// missing target reports `NotFound` whatever else the request holds.
    pub fn add_question_placed(
        &self,
        req: AddQuestion,
    ) -> SurveyResult<(Created<QuestionId>, QuestionPlacement)> {
        let AddQuestion {
            survey_id,
            page_id,
            block_id,
            question_type,
            question_text,
            required,
            options,
            attributes,
        } = req;

        let defaults = Arc::clone(&self.defaults);
        let (question_id, placement) = self
            .store
            .update(&survey_id, |survey| {
                let slots = plan(survey, page_id.as_ref(), block_id.as_ref())?;
                let kind = QuestionKind::build(question_type, options, attributes)?;
                let question = Question::new(question_text, required, kind)?;
                let question_id = question.id.clone();

                let container = apply(survey, slots, &defaults);
                container.block.questions.push(question);
                Ok::<_, SurveyError>((
                    question_id,
                    QuestionPlacement {
                        page_id: container.page_id,
                        block_id: container.block.id.clone(),
                    },
                ))
            })
            .ok_or_else(|| survey_not_found(&survey_id))??;

        tracing::info!(
            survey_id = %survey_id,
            page_id = %placement.page_id,
            block_id = %placement.block_id,
            question_id = %question_id,
            question_type = %question_type,
            "Added question"
        );

        let message = format!(
            "Added {} question {} to block {}",
            question_type, question_id, placement.block_id
        );
        Ok((
            Created {
                id: question_id,
                message,
            },
            placement,
        ))
    }

    /// Check that a survey, and the page/block given, exist.
    ///
    /// Read-only. Omitted IDs always pass since they resolve to defaults.
    pub fn check_target(
        &self,
        survey_id: &SurveyId,
        page_id: Option<&PageId>,
        block_id: Option<&BlockId>,
    ) -> SurveyResult<()> {
        self.store
            .read(survey_id, |survey| plan(survey, page_id, block_id).map(|_| ()))
            .ok_or_else(|| survey_not_found(survey_id))?
    }

    /// Append a new empty page to the end of a survey.
    pub fn add_page(
        &self,
        survey_id: &SurveyId,
        title: impl Into<String>,
    ) -> SurveyResult<Created<PageId>> {
        let title = title.into();
        require_non_empty("title", &title)?;

        let page = Page::new(title);
        let page_id = page.id.clone();
        self.store
            .update(survey_id, |survey| survey.pages.push(page))
            .ok_or_else(|| survey_not_found(survey_id))?;

        tracing::info!(survey_id = %survey_id, page_id = %page_id, "Added page");
        Ok(Created {
            message: format!("Page {page_id} added"),
            id: page_id,
        })
    }

    /// Append a new empty block to a page.
    ///
    /// The page resolves like `add_question`'s: omitted means the first page
    /// (created if missing), a supplied ID must exist.
    pub fn add_block(&self, req: AddBlock) -> SurveyResult<Created<BlockId>> {
        require_non_empty("title", &req.title)?;

        let mut block = Block::new(req.title);
        if let Some(randomization) = req.randomization {
            block.randomization = randomization;
        }
        let block_id = block.id.clone();

        let defaults = Arc::clone(&self.defaults);
        let page_id = self
            .store
            .update(&req.survey_id, |survey| {
                let slot = plan_page(survey, req.page_id.as_ref())?;
                let idx = apply_page(survey, slot, &defaults);
                let page = &mut survey.pages[idx];
                page.blocks.push(block);
                Ok::<_, SurveyError>(page.id.clone())
            })
            .ok_or_else(|| survey_not_found(&req.survey_id))??;

        tracing::info!(
            survey_id = %req.survey_id,
            page_id = %page_id,
            block_id = %block_id,
            "Added block"
        );
        Ok(Created {
            message: format!("Block {block_id} added to page {page_id}"),
            id: block_id,
        })
    }
}
