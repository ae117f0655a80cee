//! Tooltip - hover-revealed label with edge-aware positioning
//!
//! Hovering the trigger starts the open delay; leaving cancels it or starts
//! the exit transition. [`Tooltip::position`] places the content on the
//! preferred side of the anchor, flips to the opposite side when it would
//! leave the viewport, then clamps it inside the viewport.

use better_core::Timer;
use better_theme::ThemeContext;

use crate::popover::Popover;

/// Side of the anchor the tooltip appears on
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TooltipSide {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

impl TooltipSide {
    pub fn opposite(self) -> Self {
        match self {
            TooltipSide::Top => TooltipSide::Bottom,
            TooltipSide::Bottom => TooltipSide::Top,
            TooltipSide::Left => TooltipSide::Right,
            TooltipSide::Right => TooltipSide::Left,
        }
    }
}

/// Alignment along the anchor edge
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TooltipAlign {
    Start,
    #[default]
    Center,
    End,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x && other.y >= self.y && other.right() <= self.right() && other.bottom() <= self.bottom()
    }
}

/// Resolved placement
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TooltipPosition {
    pub x: f32,
    pub y: f32,
    /// Side actually used after flipping
    pub side: TooltipSide,
}

#[derive(Clone, Debug)]
pub struct Tooltip {
    text: String,
    side: TooltipSide,
    align: TooltipAlign,
    open_delay_ms: u64,
    offset: f32,
    open_timer: Timer,
    popover: Popover,
}

impl Tooltip {
    pub fn new(ctx: &ThemeContext, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            side: TooltipSide::default(),
            align: TooltipAlign::default(),
            open_delay_ms: ctx.tooltip_delay_ms(),
            offset: ctx.tooltip_offset(),
            open_timer: Timer::new(),
            popover: Popover::from_context(ctx),
        }
    }

    pub fn side(mut self, side: TooltipSide) -> Self {
        self.side = side;
        self
    }

    pub fn align(mut self, align: TooltipAlign) -> Self {
        self.align = align;
        self
    }

    pub fn open_delay_ms(mut self, delay: u64) -> Self {
        self.open_delay_ms = delay;
        self
    }

    pub fn offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_visible(&self) -> bool {
        self.popover.is_open()
    }

    pub fn is_mounted(&self) -> bool {
        self.popover.is_mounted()
    }

    pub fn hover_start(&mut self, now_ms: u64) {
        if self.popover.is_open() {
            return;
        }
        if self.open_delay_ms == 0 {
            self.popover.open(now_ms);
        } else {
            self.open_timer.start(now_ms, self.open_delay_ms);
        }
    }

    pub fn hover_end(&mut self, now_ms: u64) {
        self.open_timer.cancel();
        self.popover.close(now_ms);
    }

    /// Advance the open delay and the exit transition
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.open_timer.fire(now_ms) {
            return self.popover.open(now_ms);
        }
        self.popover.tick(now_ms)
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.open_timer.deadline().or(self.popover.next_deadline())
    }

    pub fn teardown(&mut self) {
        self.open_timer.cancel();
        self.popover.cancel();
    }

    fn place(&self, side: TooltipSide, anchor: Rect, width: f32, height: f32) -> Rect {
        let along = |start: f32, anchor_len: f32, len: f32| match self.align {
            TooltipAlign::Start => start,
            TooltipAlign::Center => start + (anchor_len - len) / 2.0,
            TooltipAlign::End => start + anchor_len - len,
        };
        let (x, y) = match side {
            TooltipSide::Top => (along(anchor.x, anchor.width, width), anchor.y - self.offset - height),
            TooltipSide::Bottom => (along(anchor.x, anchor.width, width), anchor.bottom() + self.offset),
            TooltipSide::Left => (anchor.x - self.offset - width, along(anchor.y, anchor.height, height)),
            TooltipSide::Right => (anchor.right() + self.offset, along(anchor.y, anchor.height, height)),
        };
        Rect::new(x, y, width, height)
    }

    /// Where to draw a `width` x `height` tooltip for `anchor` inside `viewport`
    pub fn position(&self, anchor: Rect, width: f32, height: f32, viewport: Rect) -> TooltipPosition {
        let preferred = self.place(self.side, anchor, width, height);
        let (rect, side) = if viewport.contains_rect(&preferred) {
            (preferred, self.side)
        } else {
            let flipped_side = self.side.opposite();
            let flipped = self.place(flipped_side, anchor, width, height);
            if fits_main_axis(flipped_side, &flipped, &viewport) && !fits_main_axis(self.side, &preferred, &viewport) {
                (flipped, flipped_side)
            } else {
                (preferred, self.side)
            }
        };
        let x = clamp(rect.x, viewport.x, viewport.right() - width);
        let y = clamp(rect.y, viewport.y, viewport.bottom() - height);
        if side != self.side {
            tracing::trace!(from = ?self.side, to = ?side, "tooltip flipped at viewport edge");
        }
        TooltipPosition { x, y, side }
    }
}

/// Whether `rect` stays inside `viewport` along the axis `side` points at
fn fits_main_axis(side: TooltipSide, rect: &Rect, viewport: &Rect) -> bool {
    match side {
        TooltipSide::Top | TooltipSide::Bottom => rect.y >= viewport.y && rect.bottom() <= viewport.bottom(),
        TooltipSide::Left | TooltipSide::Right => rect.x >= viewport.x && rect.right() <= viewport.right(),
    }
}

/// Clamp that tolerates content larger than the range (pins to `min`)
fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

pub fn tooltip(ctx: &ThemeContext, text: impl Into<String>) -> Tooltip {
    Tooltip::new(ctx, text)
}
