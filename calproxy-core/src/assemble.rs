//! Feed assembly: deduplication, hiding and per-event normalization.

use std::collections::{HashMap, HashSet};

use crate::courses::course_title;
use crate::error::CalProxyResult;
use crate::event::Event;
use crate::feed::{Feed, FeedComponent, RawComponent};
use crate::ics::parse_feed;
use crate::location;
use crate::normalize::normalize;
use crate::offset::Offsets;
use crate::summary;
use crate::tables::Tables;

/// Everything a caller can ask for on a single request.
#[derive(Debug, Clone, Default)]
pub struct FeedOptions {
    /// Course titles to leave out of the feed
    pub hidden: HashSet<String>,
    pub offsets: Offsets,
}

impl FeedOptions {
    /// An event is hidden if its course title was listed, either as sent
    /// upstream or in cleaned form (with or without shortening).
    pub fn is_hidden(&self, event: &Event, tables: &Tables) -> bool {
        if self.hidden.is_empty() {
            return false;
        }
        if self.hidden.contains(&event.summary)
            || self.hidden.contains(&course_title(&event.summary))
        {
            return true;
        }
        let stripped = summary::strip(&event.summary);
        self.hidden.contains(&stripped)
            || self.hidden.contains(&tables.replacements.apply(&stripped))
    }
}

enum Slot {
    Other(RawComponent),
    Event { event: Event, extra_rooms: Vec<String> },
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    duplicates: usize,
    hidden: usize,
}

/// Turns a raw upstream feed into the cleaned feed served to callers.
pub struct FeedAssembler<'a> {
    tables: &'a Tables,
}

impl<'a> FeedAssembler<'a> {
    pub fn new(tables: &'a Tables) -> Self {
        FeedAssembler { tables }
    }

    pub fn assemble(&self, bytes: &[u8], options: &FeedOptions) -> CalProxyResult<Feed> {
        let feed = parse_feed(bytes)?;
        Ok(self.assemble_feed(feed, options))
    }

    /// Deduplicate, hide and normalize an already parsed feed.
    ///
    /// The first event for a title and start time is kept. Later duplicates
    /// are dropped, but rooms they name that the kept event does not are
    /// listed as additional rooms on the kept event.
    pub fn assemble_feed(&self, feed: Feed, options: &FeedOptions) -> Feed {
        let mut slots: Vec<Slot> = Vec::with_capacity(feed.components.len());
        // dedup key -> index of the kept event, None if it was hidden
        let mut seen: HashMap<String, Option<usize>> = HashMap::new();
        let mut tally = Tally::default();

        for component in feed.components {
            let event = match component {
                FeedComponent::Other(raw) => {
                    slots.push(Slot::Other(raw));
                    continue;
                }
                FeedComponent::Event(event) => event,
            };

            let key = event.dedup_key();
            if let Some(kept) = seen.get(&key) {
                tally.duplicates += 1;
                if let Some(index) = *kept {
                    fold_rooms(&mut slots[index], &event);
                }
                continue;
            }

            if options.is_hidden(&event, self.tables) {
                tally.hidden += 1;
                seen.insert(key, None);
                continue;
            }

            seen.insert(key, Some(slots.len()));
            slots.push(Slot::Event {
                event,
                extra_rooms: Vec::new(),
            });
        }

        let components: Vec<FeedComponent> = slots
            .into_iter()
            .map(|slot| match slot {
                Slot::Other(raw) => FeedComponent::Other(raw),
                Slot::Event { event, extra_rooms } => {
                    let (start, end) = options.offsets.for_recurrence(event.recurrence_number());
                    FeedComponent::Event(normalize(event, self.tables, start, end, &extra_rooms))
                }
            })
            .collect();

        tracing::debug!(
            components = components.len(),
            duplicates = tally.duplicates,
            hidden = tally.hidden,
            "Assembled feed"
        );

        Feed {
            properties: feed.properties,
            components,
        }
    }
}

/// Record the rooms of a dropped duplicate on the event that was kept.
fn fold_rooms(slot: &mut Slot, duplicate: &Event) {
    let Slot::Event { event, extra_rooms } = slot else {
        return;
    };
    let kept_rooms = location::room_codes(&event.location, &event.description);
    for room in location::room_codes(&duplicate.location, &duplicate.description) {
        if !kept_rooms.contains(&room) && !extra_rooms.contains(&room) {
            tracing::debug!(summary = %event.summary, room = %room, "Folding duplicate room");
            extra_rooms.push(room);
        }
    }
}
