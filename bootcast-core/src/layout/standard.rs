// SPDX-FileCopyrightText: 2025 some100 <ootinnyoo@outlook.com>
// SPDX-License-Identifier: MIT

//! The bordered GRUB style layout.

use log::debug;
use tinyvec::ArrayVec;

use crate::{
    layout::{
        LayoutMode, LayoutRequest, MenuLayout, Region, Regions, RelaxStep, ScreenGeometry, cell,
        clamp_entries, signed,
    },
    text::{Margins, count_lines},
};

/// The help shown while an entry is edited.
pub const EDIT_HELP: &str = "Minimum Emacs-like screen editing is supported. TAB lists completions. Press Ctrl-x or F10 to boot, Ctrl-c or F2 for a command-line or ESC to discard edits and return to the menu.";

/// The first help paragraph, unless `menu_footer1_gfx` replaces it.
pub const FOOTER1_DEFAULT: &str = "Use the \u{2191} and \u{2193} keys to select which entry is highlighted.";

/// The second help paragraph of a top level menu.
pub const FOOTER2_DEFAULT: &str = "Press enter to boot the selected OS or ESC to stop the countdown.";

/// The second help paragraph of a nested menu, unless `menu_footer2` replaces it.
pub const FOOTER2_NESTED_DEFAULT: &str =
    "Press enter to boot the selected OS or ESC to return to the previous menu.";

/// Lays out the standard menu.
pub(super) fn layout(request: &LayoutRequest<'_>) -> MenuLayout {
    let width = i32::from(request.size.width);
    let height = i32::from(request.size.height);
    let thresholds = request.thresholds;

    let mut border = 1;
    let mut first_entry_x = 2; // margin and border
    let mut entry_width = width - 5;
    let mut first_entry_y = 4; // two blank lines, banner and top border
    let mut timeout_lines = 2;
    let mut empty_lines = 1;
    let mut banner = true;

    // bottom border, blank line, countdown and final blank line
    let mut num_entries = height - first_entry_y - 1 - 1 - timeout_lines - 1;

    let help = request.messages.help(request.nested, request.edit_mode);
    let help_lines = signed(
        help.iter()
            .map(|paragraph| count_lines(paragraph, Margins::STANDARD, request.size.width))
            .sum(),
    );

    let cramped = |num_entries: i32, entry_width: i32| {
        num_entries - help_lines < thresholds.min_entries
            || entry_width < thresholds.min_entry_width
    };
    let too_few = |num_entries: i32| num_entries - help_lines < thresholds.min_entries;

    let mut relaxations = ArrayVec::new();

    if cramped(num_entries, entry_width) {
        num_entries += 4;
        first_entry_y -= 2;
        empty_lines = 0;
        first_entry_x -= 1;
        entry_width += 1;
        relaxations.push(RelaxStep::CompactMargins);
    }

    if cramped(num_entries, entry_width) {
        num_entries += 2;
        first_entry_y -= 1;
        first_entry_x -= 1;
        entry_width += 2;
        border = 0;
        relaxations.push(RelaxStep::RemoveBorder);
    }

    entry_width = entry_width.max(1);

    if too_few(num_entries) && timeout_lines == 2 {
        timeout_lines = 1;
        num_entries += 1;
        relaxations.push(RelaxStep::ShortenTimeout);
    }

    if too_few(num_entries) {
        num_entries += 1;
        first_entry_y -= 1;
        banner = false;
        relaxations.push(RelaxStep::HideBanner);
    }

    let show_help = num_entries - help_lines >= thresholds.min_entries_with_footer;
    if show_help {
        num_entries -= help_lines;
    }

    if !relaxations.is_empty() {
        debug!("standard layout relaxed: {relaxations:?}");
    }

    let first_entry_y = first_entry_y.max(0);
    let num_entries = clamp_entries(num_entries, first_entry_y, border, height);

    let below_entries = first_entry_y + num_entries + border + empty_lines;
    let help_region = (show_help && help_lines > 0).then(|| Region {
        y: cell(below_entries),
        lines: cell(help_lines),
    });
    let timeout_y = below_entries + if show_help { help_lines } else { 0 };

    let geometry = ScreenGeometry {
        border: cell(border),
        first_entry_x: cell(first_entry_x),
        entry_width: cell(entry_width),
        first_entry_y: cell(first_entry_y),
        num_entries: cell(num_entries),
        timeout_lines: cell(timeout_lines),
        timeout_y: cell(timeout_y),
        right_margin: cell(width - first_entry_x - entry_width - 1),
    };

    MenuLayout {
        mode: LayoutMode::Standard,
        geometry,
        regions: Regions {
            banner: banner.then(|| Region {
                y: cell(empty_lines),
                lines: 1,
            }),
            help: help_region,
            ..Regions::default()
        },
        relaxations,
    }
}
