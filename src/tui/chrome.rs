// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ontolens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ontolens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

// Pane titles, footer and text wrapping helpers used by TUI rendering.

/// Pane that receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Graph,
    Edges,
    Chat,
    Drawer,
}

impl Focus {
    /// Next pane in Tab order; the drawer only takes part while it is open.
    fn cycle(self, drawer_open: bool) -> Self {
        match self {
            Self::Graph => Self::Edges,
            Self::Edges => Self::Chat,
            Self::Chat if drawer_open => Self::Drawer,
            Self::Chat | Self::Drawer => Self::Graph,
        }
    }

    fn cycle_back(self, drawer_open: bool) -> Self {
        match self {
            Self::Graph if drawer_open => Self::Drawer,
            Self::Graph => Self::Chat,
            Self::Edges => Self::Graph,
            Self::Chat => Self::Edges,
            Self::Drawer => Self::Chat,
        }
    }
}

fn pane_title(label: &str, focused: bool, suffix: Option<&str>) -> String {
    let marker = if focused { "▸ " } else { "" };
    match suffix {
        Some(suffix) => format!(" {marker}{label} · {suffix} "),
        None => format!(" {marker}{label} "),
    }
}

fn pane_block<'a>(title: String, focused: bool, theme: &TuiTheme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(theme.panel_border_style(focused))
}

fn footer_hints(focus: Focus) -> &'static [(&'static str, &'static str)] {
    match focus {
        Focus::Graph => &[
            ("←↑↓→", "move"),
            ("Space", "select"),
            ("o", "attributes"),
            ("Tab", "pane"),
            ("^r", "reset"),
            ("^e", "export"),
            ("^q", "quit"),
        ],
        Focus::Edges => {
            &[("↑↓", "move"), ("Space", "select"), ("Tab", "pane"), ("^e", "export"), ("^q", "quit")]
        }
        Focus::Chat => &[
            ("Enter", "send"),
            ("↑", "last command"),
            ("PgUp/PgDn", "scroll"),
            ("Tab", "pane"),
            ("^q", "quit"),
        ],
        Focus::Drawer => {
            &[("↑↓", "move"), ("Space", "select"), ("Esc", "close"), ("Tab", "pane"), ("^q", "quit")]
        }
    }
}

fn footer_line(focus: Focus, toast: Option<&str>, theme: &TuiTheme) -> Line<'static> {
    let mut spans = Vec::new();
    for (idx, (key, label)) in footer_hints(focus).iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled("  ", theme.muted_style()));
        }
        spans.push(Span::styled(*key, theme.user_style()));
        spans.push(Span::styled(format!(" {label}"), theme.muted_style()));
    }
    if let Some(toast) = toast {
        spans.push(Span::styled(" │ ", theme.muted_style()));
        spans.push(Span::styled(toast.to_owned(), theme.base_style()));
    }
    Line::from(spans)
}

/// Splits `text` into rows of at most `width` characters, keeping explicit line breaks.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    for line in text.split('\n') {
        let chars = line.chars().collect::<Vec<_>>();
        if chars.is_empty() {
            rows.push(String::new());
            continue;
        }
        for chunk in chars.chunks(width) {
            rows.push(chunk.iter().collect());
        }
    }
    rows
}

fn pad_to(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.chars().take(width).collect()
    } else {
        format!("{text}{}", " ".repeat(width - len))
    }
}
