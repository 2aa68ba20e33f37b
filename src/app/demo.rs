//! The demo stages and the engine instances each one mounts.
//!
//! A [`Demo`] is built when its stage is selected and dropped when another
//! stage replaces it; nothing survives an unmount.

use std::time::Duration;

use chrono::Local;
use clap::ValueEnum;
use ratatui::layout::Rect;

use crate::config::EffectConfig;
use crate::core::chip::ChipSequence;
use crate::core::countdown::Countdown;
use crate::core::pull_refresh::PullToRefresh;
use crate::core::scroll_boundary::{BoundaryConfig, NestedScroll};
use crate::core::search_bar::{SearchConfig, SearchTransition};
use crate::core::section_pager::SectionPager;
use crate::core::swipe_row::{ListItem, SwipeList};
use crate::core::transition::TransitionState;

use super::event::EventSender;
use super::ticker::Ticker;

const SWAP: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DemoKind {
    #[default]
    Countdown,
    Swipe,
    Parallax,
    Refresh,
    Pager,
    Chip,
}

impl DemoKind {
    pub const ALL: &[DemoKind] = &[
        DemoKind::Countdown,
        DemoKind::Swipe,
        DemoKind::Parallax,
        DemoKind::Refresh,
        DemoKind::Pager,
        DemoKind::Chip,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DemoKind::Countdown => "Countdown",
            DemoKind::Swipe => "Swipe",
            DemoKind::Parallax => "Parallax",
            DemoKind::Refresh => "Refresh",
            DemoKind::Pager => "Pager",
            DemoKind::Chip => "Chip",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|&k| k == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

// ───────────────────────────────────────── per-demo state ────

pub struct CountdownDemo {
    pub countdown: Countdown,
    /// Held only so that dropping the demo stops the ticks.
    _ticker: Ticker,
}

pub struct SwipeDemo {
    pub list: SwipeList,
    pub selected: usize,
}

impl SwipeDemo {
    pub fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.list.len().saturating_sub(1));
    }
}

pub struct ParallaxDemo {
    pub scroll: NestedScroll,
    pub header_height: f64,
    pub items: Vec<String>,
}

pub struct RefreshDemo {
    pub pull: PullToRefresh,
    pub search: SearchTransition,
    pub feed: Vec<String>,
    /// First visible feed row.
    pub scroll: usize,
    refreshes: usize,
}

impl RefreshDemo {
    pub fn at_top(&self) -> bool {
        self.scroll == 0
    }

    /// Feed entries matching the current query.
    pub fn results(&self) -> Vec<&str> {
        let query = self.search.query().to_lowercase();
        self.feed
            .iter()
            .filter(|item| !query.is_empty() && item.to_lowercase().contains(&query))
            .map(String::as_str)
            .collect()
    }

    fn on_refreshed(&mut self) {
        self.refreshes += 1;
        self.feed
            .insert(0, format!("Fresh story #{} just landed", self.refreshes));
        self.scroll = 0;
    }
}

pub struct PagerDemo {
    pub pager: SectionPager,
}

pub struct ChipDemo {
    pub chip: ChipSequence,
}

// ───────────────────────────────────────── demo ──────────────

pub enum Demo {
    Countdown(CountdownDemo),
    Swipe(SwipeDemo),
    Parallax(ParallaxDemo),
    Refresh(RefreshDemo),
    Pager(PagerDemo),
    Chip(ChipDemo),
}

impl Demo {
    /// Build the engines for `kind`.  Mounting the countdown spawns its
    /// ticker, so that case needs a tokio runtime.
    pub fn mount(
        kind: DemoKind,
        effects: &EffectConfig,
        countdown_secs: u64,
        events: &EventSender,
        now: Duration,
    ) -> Self {
        tracing::debug!(demo = kind.label(), "mount");
        match kind {
            DemoKind::Countdown => Demo::Countdown(CountdownDemo {
                countdown: Countdown::starting_in(
                    countdown_secs,
                    Local::now(),
                    effects.glyph_height,
                    effects.roll(),
                ),
                _ticker: Ticker::every(Duration::from_secs(1), events.clone()),
            }),
            DemoKind::Swipe => Demo::Swipe(SwipeDemo {
                list: SwipeList::new(inbox(), effects.swipe()),
                selected: 0,
            }),
            DemoKind::Parallax => Demo::Parallax(ParallaxDemo {
                scroll: NestedScroll::new(BoundaryConfig::default(), effects.parallax_depth),
                header_height: effects.header_height,
                items: (1..=40).map(|i| format!("Episode {i:02}")).collect(),
            }),
            DemoKind::Refresh => Demo::Refresh(RefreshDemo {
                pull: PullToRefresh::new(effects.pull()),
                search: SearchTransition::new(SearchConfig::default()),
                feed: feed(),
                scroll: 0,
                refreshes: 0,
            }),
            DemoKind::Pager => Demo::Pager(PagerDemo {
                pager: SectionPager::new(effects.section_count, SWAP),
            }),
            DemoKind::Chip => {
                let mut chip = ChipSequence::new(4.0, 24.0);
                chip.start(now);
                Demo::Chip(ChipDemo { chip })
            }
        }
    }

    pub fn kind(&self) -> DemoKind {
        match self {
            Demo::Countdown(_) => DemoKind::Countdown,
            Demo::Swipe(_) => DemoKind::Swipe,
            Demo::Parallax(_) => DemoKind::Parallax,
            Demo::Refresh(_) => DemoKind::Refresh,
            Demo::Pager(_) => DemoKind::Pager,
            Demo::Chip(_) => DemoKind::Chip,
        }
    }

    /// Report the stage size to engines that depend on layout.
    pub fn measure(&mut self, stage: Rect) {
        if let Demo::Parallax(d) = self {
            // One row is the sticky header bar; the rest is the page.
            let page_rows = f64::from(stage.height.saturating_sub(1));
            let upper = d.header_height.min(page_rows - 2.0);
            // Items plus the divider row above them.
            let inner_max = (d.items.len() as f64 + 1.0 - page_rows).max(0.0);
            d.scroll.measure(upper, inner_max);
        }
    }

    /// Advance every engine of this demo by one frame.  Returns a status
    /// line when something worth reporting completed.
    pub fn tick(&mut self, now: Duration, dt: f64) -> Option<String> {
        match self {
            Demo::Countdown(d) => {
                d.countdown.tick(now);
                None
            }
            Demo::Swipe(d) => {
                d.list.tick(now);
                None
            }
            Demo::Parallax(d) => {
                d.scroll.tick(dt);
                None
            }
            Demo::Refresh(d) => {
                d.search.tick(now);
                if d.pull.tick(now) {
                    d.on_refreshed();
                    return Some("Feed refreshed".into());
                }
                None
            }
            Demo::Pager(d) => {
                d.pager.tick(now);
                None
            }
            Demo::Chip(d) => {
                d.chip.tick(now);
                None
            }
        }
    }

    /// Wall-clock second boundary.
    pub fn on_countdown_tick(&mut self, now: Duration) {
        if let Demo::Countdown(d) = self {
            d.countdown.sync(Local::now(), now);
        }
    }

    /// Discrete flags for the status bar.
    pub fn flags(&self) -> String {
        match self {
            Demo::Countdown(d) => {
                let digits: String = d
                    .countdown
                    .slots()
                    .iter()
                    .map(|s| char::from(b'0' + s.latest()))
                    .collect();
                let wraps: u64 = d.countdown.slots().iter().map(|s| s.wraps()).sum();
                let locked = d
                    .countdown
                    .slots()
                    .iter()
                    .any(|s| s.state() == TransitionState::Locked);
                format!(
                    "{}:{}:{} | snaps {wraps} | {}",
                    &digits[0..2],
                    &digits[2..4],
                    &digits[4..6],
                    if locked { "locked" } else { "idle" },
                )
            }
            Demo::Swipe(d) => match d.list.row(d.selected) {
                Some(row) => format!(
                    "row {} {} | {}",
                    d.selected + 1,
                    row.flag(),
                    row.state().label()
                ),
                None => "list empty".into(),
            },
            Demo::Parallax(d) => format!(
                "{} | outer {:.0} inner {:.0}",
                d.scroll.mode().label(),
                d.scroll.outer(),
                d.scroll.inner()
            ),
            Demo::Refresh(d) => format!(
                "pull {:.1} | {} | search {}",
                d.pull.pull(),
                d.pull.state().label(),
                if d.search.is_searching() { "on" } else { "off" }
            ),
            Demo::Pager(d) => format!(
                "section {}/{} | {}",
                d.pager.index() + 1,
                d.pager.count(),
                d.pager.state().label()
            ),
            Demo::Chip(d) => format!(
                "chip {} | {}",
                d.chip.phase().label(),
                d.chip.state().label()
            ),
        }
    }
}

fn inbox() -> Vec<ListItem> {
    [
        ("Build finished", "release 0.4.2 is ready to ship"),
        ("Standup moved", "tomorrow at 10:30 instead"),
        ("Invoice #1182", "due in 14 days"),
        ("Weekly digest", "12 new posts in followed topics"),
        ("Password changed", "if this wasn't you, let us know"),
        ("Lunch?", "ramen place around the corner"),
        ("Review requested", "refactor the scroll handoff"),
        ("Disk almost full", "backup volume at 91%"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (title, detail))| ListItem::new(i as u64 + 1, title, detail))
    .collect()
}

fn feed() -> Vec<String> {
    [
        "City council approves new bike lanes",
        "Local bakery wins regional award",
        "Storm expected over the weekend",
        "Library extends opening hours",
        "Rust 2024 edition adoption keeps growing",
        "Marathon route announced",
        "New exhibit opens at the science museum",
        "Farmers market returns to the square",
        "Transit fares frozen for another year",
        "High school robotics team heads to finals",
        "Park renovation enters final phase",
        "Night sky event visible this Tuesday",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
