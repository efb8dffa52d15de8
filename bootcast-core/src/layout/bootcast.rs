// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! The borderless vendor layout.
//!
//! From top to bottom: a margin, the title, a gap, the optional top message and its spacer, the prompt and
//! countdown row, a spacer, the entries, a spacer, the optional bottom message and its spacer, the warning line,
//! a spacer, the footer and a bottom margin.

use tinyvec::ArrayVec;

use crate::{
    layout::{
        LayoutMode, LayoutRequest, MenuLayout, Region, Regions, ScreenGeometry, cell,
        clamp_entries, signed,
    },
    text::{Margins, count_lines},
};

/// Rows above the title.
const TITLE_MARGIN: i32 = 2;

/// Rows between the title and the top message.
const TOP_SPACE: i32 = 2;

/// Most rows the top message may use.
const TOP_MESSAGE_LINES: usize = 2;

/// Most rows the bottom message may use.
const BOTTOM_MESSAGE_LINES: usize = 3;

/// Columns left of the entry block before it is narrowed.
const MIN_VMARGIN: i32 = 3;

/// Rows below the entries: spacer, warning, spacer, footer and bottom margin.
const ROWS_BELOW_ENTRIES: i32 = 5;

/// Lays out the bootcast menu.
pub(super) fn layout(request: &LayoutRequest<'_>) -> MenuLayout {
    let width = i32::from(request.size.width);
    let height = i32::from(request.size.height);
    let messages = request.messages;

    let mut first_entry_x = MIN_VMARGIN;
    let mut entry_width = width - 2 - 2 * MIN_VMARGIN;

    if request.label_width > 0 {
        let widest = signed(request.label_width).saturating_add(1);
        if widest < entry_width {
            entry_width = widest;
            first_entry_x = (width - entry_width - 2) / 2;
        }
    }

    let measure = |message: Option<&str>, most: usize| {
        message.map_or(0, |message| {
            count_lines(message, Margins::STANDARD, request.size.width).min(most)
        })
    };
    let top_lines = signed(measure(messages.top, TOP_MESSAGE_LINES));
    let bottom_lines = signed(measure(messages.bottom, BOTTOM_MESSAGE_LINES));

    let top_message_y = TITLE_MARGIN + 1 + TOP_SPACE;
    let timeout_lines = 1;
    let mut timeout_y = top_message_y;
    if top_lines > 0 {
        timeout_y += top_lines + 1;
    }

    let first_entry_y = timeout_y + timeout_lines + 1;
    let num_entries = (height - first_entry_y - ROWS_BELOW_ENTRIES).max(0);
    let warning_y = first_entry_y + num_entries + 1;

    let mut num_entries = num_entries;
    if bottom_lines > 0 {
        num_entries -= bottom_lines + 1;
    }

    let entry_width = entry_width.max(1);
    let num_entries = clamp_entries(num_entries, first_entry_y, 0, height);

    let region = |y: i32, lines: i32| Region {
        y: cell(y),
        lines: cell(lines),
    };

    let regions = Regions {
        banner: messages.title.map(|_| region(TITLE_MARGIN, 1)),
        top_message: (top_lines > 0).then(|| region(top_message_y, top_lines)),
        bottom_message: (bottom_lines > 0)
            .then(|| region(warning_y - bottom_lines - 1, bottom_lines)),
        warning: messages.warning.map(|_| region(warning_y, 1)),
        footer: messages.footer.map(|_| region(warning_y + 2, 1)),
        help: None,
    };

    let geometry = ScreenGeometry {
        border: 0,
        first_entry_x: cell(first_entry_x),
        entry_width: cell(entry_width),
        first_entry_y: cell(first_entry_y),
        num_entries: cell(num_entries),
        timeout_lines: cell(timeout_lines),
        timeout_y: cell(timeout_y),
        right_margin: cell(width - first_entry_x - entry_width - 1),
    };

    MenuLayout {
        mode: LayoutMode::Bootcast,
        geometry,
        regions,
        relaxations: ArrayVec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{layout::MenuMessages, term::TermSize};

    fn request(messages: MenuMessages<'_>, label_width: usize) -> LayoutRequest<'_> {
        LayoutRequest {
            mode: LayoutMode::Bootcast,
            size: TermSize {
                width: 80,
                height: 25,
            },
            messages,
            label_width,
            ..LayoutRequest::default()
        }
    }

    #[test]
    fn test_plain() {
        let layout = layout(&request(MenuMessages::default(), 18));
        let geo = layout.geometry;
        assert_eq!(geo.border, 0);
        assert_eq!(geo.entry_width, 19);
        assert_eq!(geo.first_entry_x, 29);
        assert_eq!(geo.timeout_y, 5);
        assert_eq!(geo.timeout_lines, 1);
        assert_eq!(geo.first_entry_y, 7);
        assert_eq!(geo.num_entries, 13);
        assert_eq!(geo.right_margin, 31);
        assert_eq!(layout.regions, Regions::default());
        assert!(layout.relaxations.is_empty());
    }

    #[test]
    fn test_wide_labels_not_narrowed() {
        let geo = layout(&request(MenuMessages::default(), 200)).geometry;
        assert_eq!(geo.first_entry_x, 3);
        assert_eq!(geo.entry_width, 72);

        let geo = layout(&request(MenuMessages::default(), 0)).geometry;
        assert_eq!(geo.entry_width, 72);
    }

    #[test]
    fn test_all_messages() {
        let messages = MenuMessages {
            title: Some("Bootcast"),
            top: Some("top message"),
            bottom: Some("bottom message"),
            warning: Some("warning"),
            footer: Some("footer"),
            ..MenuMessages::default()
        };
        let layout = layout(&request(messages, 18));
        let geo = layout.geometry;
        assert_eq!(geo.timeout_y, 7);
        assert_eq!(geo.first_entry_y, 9);
        assert_eq!(geo.num_entries, 9);

        let regions = layout.regions;
        assert_eq!(regions.banner, Some(Region { y: 2, lines: 1 }));
        assert_eq!(regions.top_message, Some(Region { y: 5, lines: 1 }));
        assert_eq!(regions.warning, Some(Region { y: 21, lines: 1 }));
        assert_eq!(regions.bottom_message, Some(Region { y: 19, lines: 1 }));
        assert_eq!(regions.footer, Some(Region { y: 23, lines: 1 }));
        assert!(geo.first_entry_y + geo.num_entries < 19);
    }

    #[test]
    fn test_message_rows_capped() {
        let long = "word ".repeat(200);
        let messages = MenuMessages {
            top: Some(&long),
            bottom: Some(&long),
            ..MenuMessages::default()
        };
        let regions = layout(&request(messages, 18)).regions;
        assert_eq!(regions.top_message.map(|r| r.lines), Some(2));
        assert_eq!(regions.bottom_message.map(|r| r.lines), Some(3));
    }
}
