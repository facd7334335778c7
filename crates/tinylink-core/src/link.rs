use crate::shortcode::ShortCode;
use jiff::Timestamp;
use std::fmt::Display;

/// Store-assigned identifier of a [`Link`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(i64);

impl LinkId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Payload for inserting a new link. The store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLink {
    pub short_code: ShortCode,
    pub long_url: String,
    pub created_at: Timestamp,
}

/// A stored shortening mapping together with its click history.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: LinkId,
    pub short_code: ShortCode,
    pub long_url: String,
    /// Always equal to `click_history.len()`.
    pub click_count: u64,
    /// Append-only, oldest first.
    pub click_history: Vec<Timestamp>,
    pub created_at: Timestamp,
}

impl Link {
    /// Builds the freshly inserted record for `new`.
    pub fn from_new(id: LinkId, new: NewLink) -> Self {
        Self {
            id,
            short_code: new.short_code,
            long_url: new.long_url,
            click_count: 0,
            click_history: Vec::new(),
            created_at: new.created_at,
        }
    }

    /// Timestamp of the most recent click, if any.
    pub fn last_clicked(&self) -> Option<Timestamp> {
        self.click_history.last().copied()
    }

    /// Appends a click and bumps the counter.
    ///
    /// The history stays chronological: a timestamp older than the last
    /// recorded click is clamped to it.
    pub fn append_click(&mut self, at: Timestamp) -> Timestamp {
        let at = match self.last_clicked() {
            Some(last) if last > at => last,
            _ => at,
        };
        self.click_history.push(at);
        self.click_count += 1;
        at
    }
}

/// A link as shown in listings, with the derived last-click time.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkOverview {
    pub link: Link,
    pub last_clicked: Option<Timestamp>,
}

impl From<Link> for LinkOverview {
    fn from(link: Link) -> Self {
        let last_clicked = link.last_clicked();
        Self { link, last_clicked }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::SignedDuration;

    fn link() -> Link {
        Link::from_new(
            LinkId::new(1),
            NewLink {
                short_code: ShortCode::new("abc123").unwrap(),
                long_url: "https://example.com".to_string(),
                created_at: Timestamp::now(),
            },
        )
    }

    #[test]
    fn new_link_has_no_clicks() {
        let link = link();
        assert_eq!(link.click_count, 0);
        assert!(link.click_history.is_empty());
        assert_eq!(link.last_clicked(), None);
    }

    #[test]
    fn append_click_keeps_count_in_sync() {
        let mut link = link();
        let first = Timestamp::now();
        let second = first + SignedDuration::from_secs(1);

        link.append_click(first);
        link.append_click(second);

        assert_eq!(link.click_count, 2);
        assert_eq!(link.click_history, vec![first, second]);
        assert_eq!(link.last_clicked(), Some(second));
    }

    #[test]
    fn append_click_clamps_out_of_order_timestamp() {
        let mut link = link();
        let later = Timestamp::now();
        let earlier = later - SignedDuration::from_millis(5);

        link.append_click(later);
        let recorded = link.append_click(earlier);

        assert_eq!(recorded, later);
        assert_eq!(link.click_history, vec![later, later]);
        assert_eq!(link.click_count, 2);
    }

    #[test]
    fn overview_derives_last_clicked() {
        let mut link = link();
        assert_eq!(LinkOverview::from(link.clone()).last_clicked, None);

        let at = Timestamp::now();
        link.append_click(at);
        assert_eq!(LinkOverview::from(link).last_clicked, Some(at));
    }
}
