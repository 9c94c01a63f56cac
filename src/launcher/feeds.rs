//! Announcement and update feeds
//!
//! Both feeds receive one delayed post after startup. Feeds are bounded and
//! evict their oldest entry once full.

use chrono::{DateTime, Local};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;
use std::time::Duration;
use tracing::debug;

use crate::config::FeedSettings;
use crate::launcher::scheduler::Scheduler;

pub const ANNOUNCEMENTS: &[&str] = &[
    "🎉 A new modpack is live! Come and try it out!",
    "🔧 Server maintenance tonight, expected to take about 1 hour",
    "🎮 Weekend event: registration for the building contest is open!",
    "📢 Welcome to all the new players joining our community!",
];

pub const UPDATE_NOTE: &str = "v1.2.4 update: improved launcher performance and interface experience!";

const SEED_ANNOUNCEMENT: &str = "Welcome back to CraftLaunch";
const SEED_UPDATE: &str = "v1.2.3 update: new profile selector";

#[derive(Clone, Debug)]
pub struct FeedEntry {
    pub text: String,
    /// Wall-clock time shown next to the entry
    pub posted_at: DateTime<Local>,
    /// Arrived while the launcher was open, as opposed to seeded at startup
    pub fresh: bool,
}

/// Which end of the list new entries go to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedOrder {
    /// Append at the end, list reads oldest to newest
    OldestFirst,
    /// Insert at the front, list reads newest to oldest
    NewestFirst,
}

/// Bounded list of feed entries
#[derive(Debug)]
pub struct Feed {
    entries: VecDeque<FeedEntry>,
    capacity: usize,
    order: FeedOrder,
}

impl Feed {
    pub fn new(capacity: usize, order: FeedOrder) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
            order,
        }
    }

    /// Add a fresh entry, evicting the oldest when full
    pub fn post(&mut self, text: impl Into<String>) {
        self.insert(text.into(), true);
    }

    /// Add a startup entry
    pub fn seed(&mut self, text: impl Into<String>) {
        self.insert(text.into(), false);
    }

    fn insert(&mut self, text: String, fresh: bool) {
        let entry = FeedEntry {
            text,
            posted_at: Local::now(),
            fresh,
        };
        match self.order {
            FeedOrder::OldestFirst => {
                self.entries.push_back(entry);
                if self.entries.len() > self.capacity {
                    self.entries.pop_front();
                }
            }
            FeedOrder::NewestFirst => {
                self.entries.push_front(entry);
                if self.entries.len() > self.capacity {
                    self.entries.pop_back();
                }
            }
        }
    }

    /// Entries in display order
    pub fn entries(&self) -> impl Iterator<Item = &FeedEntry> {
        self.entries.iter()
    }

    /// Number of entries currently held
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FeedTimer {
    Announcement,
    UpdateNote,
}

/// The launcher's two feeds and their delayed posts
pub struct ContentFeeds<R: Rng> {
    pub announcements: Feed,
    pub updates: Feed,
    scheduler: Scheduler<FeedTimer>,
    rng: R,
}

impl<R: Rng> ContentFeeds<R> {
    /// Seed both feeds and schedule their delayed posts
    pub fn new(settings: &FeedSettings, rng: R) -> Self {
        let mut announcements = Feed::new(settings.capacity, FeedOrder::OldestFirst);
        let mut updates = Feed::new(settings.capacity, FeedOrder::NewestFirst);
        announcements.seed(SEED_ANNOUNCEMENT);
        updates.seed(SEED_UPDATE);

        let mut scheduler = Scheduler::new();
        scheduler.after(
            Duration::from_millis(settings.announcement_delay_ms),
            FeedTimer::Announcement,
        );
        scheduler.after(
            Duration::from_millis(settings.update_delay_ms),
            FeedTimer::UpdateNote,
        );

        Self {
            announcements,
            updates,
            scheduler,
            rng,
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        for timer in self.scheduler.advance(delta) {
            match timer {
                FeedTimer::Announcement => {
                    if let Some(text) = ANNOUNCEMENTS.choose(&mut self.rng) {
                        debug!("Posting announcement");
                        self.announcements.post(*text);
                    }
                }
                FeedTimer::UpdateNote => {
                    debug!("Posting update note");
                    self.updates.post(UPDATE_NOTE);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn texts(feed: &Feed) -> Vec<String> {
        feed.entries().map(|e| e.text.clone()).collect()
    }

    #[test]
    fn test_oldest_first_evicts_front() {
        let mut feed = Feed::new(2, FeedOrder::OldestFirst);
        feed.post("a");
        feed.post("b");
        feed.post("c");
        assert_eq!(texts(&feed), vec!["b", "c"]);
    }

    #[test]
    fn test_newest_first_evicts_back() {
        let mut feed = Feed::new(2, FeedOrder::NewestFirst);
        feed.post("a");
        feed.post("b");
        feed.post("c");
        assert_eq!(texts(&feed), vec!["c", "b"]);
    }

    #[test]
    fn test_delayed_posts() {
        let settings = FeedSettings::default();
        let mut feeds = ContentFeeds::new(&settings, StdRng::seed_from_u64(7));
        assert_eq!(feeds.announcements.len(), 1);
        assert_eq!(feeds.updates.len(), 1);

        feeds.advance(Duration::from_millis(1999));
        assert_eq!(feeds.announcements.len(), 1);

        feeds.advance(Duration::from_millis(1));
        assert_eq!(feeds.announcements.len(), 2);
        let posted = feeds.announcements.entries().last().unwrap();
        assert!(posted.fresh);
        assert!(ANNOUNCEMENTS.contains(&posted.text.as_str()));
        assert!(!feeds.announcements.entries().next().unwrap().fresh);
        assert_eq!(feeds.updates.len(), 1);

        feeds.advance(Duration::from_millis(3000));
        assert_eq!(texts(&feeds.updates)[0], UPDATE_NOTE);

        // One-shot: nothing more arrives
        feeds.advance(Duration::from_secs(60));
        assert_eq!(feeds.announcements.len(), 2);
        assert_eq!(feeds.updates.len(), 2);
    }
}
