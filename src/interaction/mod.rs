// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Selection, pointer gestures, inline rename and keyboard navigation.

pub mod inline_edit;
pub mod navigate;
pub mod pointer;
pub mod selection;

pub use inline_edit::InlineEdit;
pub use navigate::{neighbor, Direction};
pub use pointer::{PointerTracker, DEFAULT_DRAG_THRESHOLD};
pub use selection::Selection;
