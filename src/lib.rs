// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Nereid mind map: an interactive, collapsible tidy-tree editor for the terminal.
//!
//! The library is host-agnostic. [`editor::MindMapEditor`] is the command surface; [`tui`] is
//! the ratatui host that ships with the binary.

pub mod editor;
pub mod interaction;
pub mod layout;
pub mod model;
pub mod ops;
pub mod render;
pub mod store;
pub mod tui;
pub mod viewport;
