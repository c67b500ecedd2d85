//! Search bookkeeping: the active query, the page counter and the
//! ticket each fetch carries so late responses can be recognised.

/// Identifies one issued search request.
///
/// A response is only applied when its ticket's generation still matches
/// the current search; a new search bumps the generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub query: String,
    pub page: u32,
}

/// Page counter plus the in-flight and end-of-results guards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    query: String,
    page: u32,
    generation: u64,
    in_flight: Option<FetchTicket>,
    exhausted: bool,
}

impl Pager {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            page: 1,
            generation: 0,
            in_flight: None,
            exhausted: false,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    #[cfg(test)]
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Start over with `query` at page 1 and issue the first request.
    ///
    /// Any request still in flight belongs to the previous generation and
    /// will be dropped when it completes.
    pub fn restart(&mut self, query: String) -> FetchTicket {
        self.query = query;
        self.page = 1;
        self.generation += 1;
        self.exhausted = false;
        self.issue()
    }

    /// Advance to the next page.
    ///
    /// Returns `None` while a request is outstanding or after the API
    /// reported the last page.
    pub fn advance(&mut self) -> Option<FetchTicket> {
        if self.in_flight.is_some() || self.exhausted {
            return None;
        }
        self.page += 1;
        Some(self.issue())
    }

    /// Whether a completed request belongs to the current search
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Clear the in-flight marker for a current ticket.
    /// `has_more` is false once the API stops advertising a next page.
    pub fn complete(&mut self, ticket: &FetchTicket, has_more: Option<bool>) {
        if !self.is_current(ticket) {
            return;
        }
        if self.in_flight.as_ref() == Some(ticket) {
            self.in_flight = None;
        }
        if let Some(has_more) = has_more {
            self.exhausted = !has_more;
        }
    }

    fn issue(&mut self) -> FetchTicket {
        let ticket = FetchTicket {
            generation: self.generation,
            query: self.query.clone(),
            page: self.page,
        };
        self.in_flight = Some(ticket.clone());
        ticket
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}
