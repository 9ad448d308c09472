//! Survey visualization as ASCII tree.
//!
//! Provides functions to format a Survey as a human-readable outline:
//! pages, then blocks, then questions, then options.

use enquete_types::{Block, Page, Question, Survey};

use crate::helpers::truncate_label;

/// Label length shown per node before truncation.
const MAX_LABEL_CHARS: usize = 48;

/// One rendered node and its children.
struct Node {
    line: String,
    children: Vec<Node>,
}

/// Format a survey as ASCII tree lines.
///
/// `max_depth` counts levels below the survey: 1 = pages, 2 = blocks,
/// 3 = questions, 4 = options.
pub fn format_survey_tree(survey: &Survey, max_depth: Option<u32>) -> Vec<String> {
    let mut lines = vec![format!(
        "{} \"{}\"",
        survey.id,
        truncate_label(&survey.title, MAX_LABEL_CHARS)
    )];

    let pages: Vec<Node> = survey.pages.iter().map(page_node).collect();
    for (idx, page) in pages.iter().enumerate() {
        let is_last = idx == pages.len() - 1;
        format_node(page, 1, "", is_last, max_depth, &mut lines);
    }

    lines
}

fn page_node(page: &Page) -> Node {
    Node {
        line: format!("{} \"{}\"", page.id, truncate_label(&page.title, MAX_LABEL_CHARS)),
        children: page.blocks.iter().map(block_node).collect(),
    }
}

fn block_node(block: &Block) -> Node {
    let randomized = if block.randomization.enabled {
        format!(" [random: {}]", block.randomization.mode.as_str())
    } else {
        String::new()
    };
    Node {
        line: format!(
            "{} \"{}\"{}",
            block.id,
            truncate_label(&block.title, MAX_LABEL_CHARS),
            randomized
        ),
        children: block.questions.iter().map(question_node).collect(),
    }
}

fn question_node(question: &Question) -> Node {
    // `*` marks required questions.
    let marker = if question.required { "*" } else { "" };
    Node {
        line: format!(
            "{} [{}{}] \"{}\"",
            question.id,
            question.question_type().as_str(),
            marker,
            truncate_label(&question.label, MAX_LABEL_CHARS)
        ),
        children: question
            .options()
            .iter()
            .map(|o| Node {
                line: format!("{} {}", o.id, truncate_label(&o.text, MAX_LABEL_CHARS)),
                children: Vec::new(),
            })
            .collect(),
    }
}

/// Recursively format a node and its children.
fn format_node(
    node: &Node,
    depth: u32,
    prefix: &str,
    is_last: bool,
    max_depth: Option<u32>,
    lines: &mut Vec<String>,
) {
    if let Some(max) = max_depth {
        if depth > max {
            return;
        }
    }

    let connector = if is_last { "└─ " } else { "├─ " };
    lines.push(format!("{}{}{}", prefix, connector, node.line));

    let child_prefix = if is_last {
        format!("{}   ", prefix)
    } else {
        format!("{}│  ", prefix)
    };

    for (i, child) in node.children.iter().enumerate() {
        let is_last_child = i == node.children.len() - 1;
        format_node(child, depth + 1, &child_prefix, is_last_child, max_depth, lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enquete_types::{
        Block, Page, QuestionAttributes, QuestionKind, QuestionType, Randomization,
        RandomizationMode,
    };

    fn sample() -> Survey {
        let mut survey = Survey::new("Feedback", None);
        let mut page = Page::new("Page 1");
        let mut block = Block::new("Block 1");
        let kind = QuestionKind::build(
            QuestionType::SingleSelect,
            vec!["Yes".into(), "No".into()],
            QuestionAttributes::default(),
        )
        .unwrap();
        block.questions.push(Question::new("Easy?", true, kind).unwrap());
        let kind =
            QuestionKind::build(QuestionType::OpenText, vec![], QuestionAttributes::default()).unwrap();
        block.questions.push(Question::new("Comments", false, kind).unwrap());
        page.blocks.push(block);
        let mut shuffled = Block::new("Shuffled");
        shuffled.randomization = Randomization::with_mode(RandomizationMode::Full, Default::default());
        page.blocks.push(shuffled);
        survey.pages.push(page);
        survey.pages.push(Page::new("Page 2"));
        survey
    }

    #[test]
    fn test_full_tree() {
        let survey = sample();
        let lines = format_survey_tree(&survey, None);
        let text = lines.join("\n");

        assert!(lines[0].contains("\"Feedback\""));
        assert!(lines[1].starts_with("├─ page_"));
        assert!(text.contains("[single_select*] \"Easy?\""));
        assert!(text.contains("[open_text] \"Comments\""));
        assert!(text.contains("opt_0 Yes"));
        assert!(text.contains("opt_1 No"));
        assert!(text.contains("[random: full]"));
        assert!(lines.last().unwrap().starts_with("└─ page_"));
        // survey + 2 pages + 2 blocks + 2 questions + 2 options
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn test_max_depth_stops_at_blocks() {
        let survey = sample();
        let lines = format_survey_tree(&survey, Some(2));
        assert_eq!(lines.len(), 5);
        assert!(!lines.iter().any(|l| l.contains("q_")));
    }

    #[test]
    fn test_nested_prefixes() {
        let survey = sample();
        let lines = format_survey_tree(&survey, None);
        // First page isn't last, so its descendants hang off a "│" rail.
        assert!(lines[2].starts_with("│  ├─ block_"));
        assert!(lines[3].starts_with("│  │  ├─ q_"));
    }
}
