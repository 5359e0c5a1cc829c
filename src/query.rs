use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use feruca::Collator;
use thiserror::Error;
use crate::data::Note;
use crate::util::StrExt;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum SortOrder {
    #[default]
    UpdatedDesc,
    UpdatedAsc,
    TitleAsc,
    TitleDesc,
}

#[derive(Debug, Error)]
#[error("unknown sort order \"{0}\", expected one of: updated-desc, updated-asc, title-asc, title-desc")]
pub struct SortOrderParseError(String);

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::UpdatedDesc,
        SortOrder::UpdatedAsc,
        SortOrder::TitleAsc,
        SortOrder::TitleDesc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::UpdatedDesc => "updated-desc",
            SortOrder::UpdatedAsc => "updated-asc",
            SortOrder::TitleAsc => "title-asc",
            SortOrder::TitleDesc => "title-desc",
        }
    }

    fn compare(self, collator: &mut Collator, a: &Note, b: &Note) -> Ordering {
        match self {
            SortOrder::UpdatedDesc => b.updated_at.cmp(&a.updated_at),
            SortOrder::UpdatedAsc => a.updated_at.cmp(&b.updated_at),
            SortOrder::TitleAsc => collator.collate(&a.title, &b.title),
            SortOrder::TitleDesc => collator.collate(&b.title, &a.title),
        }
    }
}

impl FromStr for SortOrder {
    type Err = SortOrderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOrder::ALL
            .into_iter()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| SortOrderParseError(s.to_owned()))
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Listing view over an already loaded collection. Never touches storage.
pub struct QueryView;

impl QueryView {
    /// Keeps notes whose title or body contains `query`, ignoring case.
    ///
    /// A blank query hands back the input as is.
    pub fn filter<N: Borrow<Note>>(notes: Vec<N>, query: &str) -> Vec<N> {
        let Some(query) = query.nonblank_to_some() else {
            return notes;
        };
        let query = query.to_lowercase();
        notes
            .into_iter()
            .filter(|n| {
                let note = n.borrow();
                note.title.to_lowercase().contains(&query)
                    || note.body.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Stable. Titles use the Unicode root collation, so accents sort next
    /// to their base letters and lowercase precedes uppercase on ties.
    pub fn sort<N: Borrow<Note>>(mut notes: Vec<N>, order: SortOrder) -> Vec<N> {
        let mut collator = Collator::default();
        notes.sort_by(|a, b| order.compare(&mut collator, a.borrow(), b.borrow()));
        notes
    }

    pub fn apply<N: Borrow<Note>>(
        notes: Vec<N>,
        query: &str,
        order: SortOrder,
    ) -> Vec<N> {
        Self::sort(Self::filter(notes, query), order)
    }
}
