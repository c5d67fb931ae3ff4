//! 앱과 함께 배포되는 드롭다운 프리셋 테이블.

use std::collections::BTreeMap;

use super::dropdown::{DropdownKind, DropdownOption};

const INSTRUCTION_PRESETS: &[(&str, &str)] = &[
    ("Summarize", "Summarize the following text."),
    (
        "Explain",
        "Explain the following text in simple terms, as if to a curious newcomer.",
    ),
    ("Rewrite", "Rewrite the following text so that it is clearer and more concise."),
    ("Outline", "Write a structured outline of the following text."),
    ("Continue", "Continue writing the following text in the same style."),
    ("Translate", "Translate the following text into English."),
];

const SCOPE_PRESETS: &[(&str, &str)] = &[
    ("Paragraph", "Answer in a single paragraph."),
    ("Bullet points", "Answer with a short list of bullet points."),
    ("One sentence", "Answer in one sentence."),
    ("Detailed", "Give a detailed answer with examples where helpful."),
];

const ROLE_PRESETS: &[(&str, &str)] = &[
    ("Assistant", "You are a helpful assistant."),
    ("Editor", "You are a meticulous copy editor."),
    ("Teacher", "You are a patient teacher."),
    ("Researcher", "You are a careful researcher who cites sources."),
    ("Critic", "You are a critical reviewer who points out weaknesses."),
];

const REASONING_PRESETS: &[(&str, &str)] = &[
    ("Step by step", "Let's think step by step."),
    ("Pros and cons", "Weigh the pros and cons before answering."),
    ("Assumptions", "List your assumptions before answering."),
    ("Double check", "Double check your answer before giving it."),
];

/// 드롭다운 이름별 고정 프리셋 목록. 실행 중에 바뀌지 않는다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetTable {
    entries: BTreeMap<DropdownKind, Vec<DropdownOption>>,
}

impl Default for PresetTable {
    fn default() -> Self {
        Self::bundled()
    }
}

impl PresetTable {
    /// 바이너리에 포함된 기본 프리셋.
    pub fn bundled() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(DropdownKind::Instruction, to_options(INSTRUCTION_PRESETS));
        entries.insert(DropdownKind::Scope, to_options(SCOPE_PRESETS));
        entries.insert(DropdownKind::Role, to_options(ROLE_PRESETS));
        entries.insert(DropdownKind::Reasoning, to_options(REASONING_PRESETS));
        Self { entries }
    }

    /// 모든 드롭다운이 비어 있는 테이블.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn with(mut self, kind: DropdownKind, options: Vec<DropdownOption>) -> Self {
        self.entries.insert(kind, options);
        self
    }

    pub fn options(&self, kind: DropdownKind) -> &[DropdownOption] {
        self.entries.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn to_options(pairs: &[(&str, &str)]) -> Vec<DropdownOption> {
    pairs
        .iter()
        .map(|(label, value)| DropdownOption::new(*label, *value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_table_covers_every_dropdown() {
        let table = PresetTable::bundled();
        for kind in DropdownKind::ALL {
            assert!(!table.options(kind).is_empty(), "{kind} has no presets");
        }
        assert_eq!(table.options(DropdownKind::Instruction)[0].label, "Summarize");
    }

    #[test]
    fn bundled_presets_keep_declared_order() {
        let table = PresetTable::bundled();
        let labels: Vec<_> = table
            .options(DropdownKind::Scope)
            .iter()
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Paragraph", "Bullet points", "One sentence", "Detailed"]);
    }
}
