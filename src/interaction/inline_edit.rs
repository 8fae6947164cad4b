// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tracing::debug;

use crate::model::NodeId;
use crate::ops::Op;

/// An in-progress rename. The tree is not touched until [`InlineEdit::finish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineEdit {
    node_id: NodeId,
    original: String,
    draft: String,
}

impl InlineEdit {
    /// Starts editing with the current label as the draft.
    pub fn begin(node_id: NodeId, original: impl Into<String>) -> Self {
        let original = original.into();
        Self { node_id, draft: original.clone(), original }
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn push(&mut self, ch: char) {
        self.draft.push(ch);
    }

    pub fn backspace(&mut self) {
        self.draft.pop();
    }

    /// Turns the draft into a rename, or `None` if the label should stay as it was
    /// (blank or unchanged draft).
    pub fn finish(self) -> Option<Op> {
        if self.draft.trim().is_empty() {
            debug!(node_id = %self.node_id, "inline edit: blank label, keeping previous");
            return None;
        }
        if self.draft == self.original {
            return None;
        }
        Some(Op::Rename { node_id: self.node_id, name: self.draft })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::InlineEdit;
    use crate::model::NodeId;
    use crate::ops::Op;

    #[test]
    fn draft_starts_as_the_original_label() {
        let edit = InlineEdit::begin(NodeId::new(3), "Algebra");
        assert_eq!(edit.draft(), "Algebra");
        assert_eq!(edit.original(), "Algebra");
    }

    #[test]
    fn typing_then_finishing_renames() {
        let mut edit = InlineEdit::begin(NodeId::new(3), "Alg");
        edit.backspace();
        edit.push('x');
        assert_eq!(
            edit.finish(),
            Some(Op::Rename { node_id: NodeId::new(3), name: "Alx".to_owned() })
        );
    }

    #[rstest]
    #[case::empty("")]
    #[case::spaces("   ")]
    #[case::tabs_and_newlines("\t\n")]
    #[case::unchanged("Algebra")]
    fn finish_keeps_the_previous_label(#[case] draft: &str) {
        let mut edit = InlineEdit::begin(NodeId::new(3), "Algebra");
        edit.set_draft(draft);
        assert_eq!(edit.finish(), None);
    }
}
