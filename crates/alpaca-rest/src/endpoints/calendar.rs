//! Market clock and calendar endpoints

use alpaca_types::{CalendarDay, Clock};
use chrono::NaiveDate;
use tracing::instrument;

use super::{Params, RequestContext};
use crate::error::RestResult;

pub struct CalendarEndpoints<'a> {
    ctx: RequestContext<'a>,
}

impl<'a> CalendarEndpoints<'a> {
    pub(crate) fn new(ctx: RequestContext<'a>) -> Self {
        Self { ctx }
    }

    /// Get the market clock
    #[instrument(skip(self))]
    pub async fn get_clock(&self) -> RestResult<Clock> {
        self.ctx.get("/v2/clock", &Params::new()).await
    }

    /// Get trading days between `start` and `end`, inclusive
    #[instrument(skip(self))]
    pub async fn get_calendar(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> RestResult<Vec<CalendarDay>> {
        let mut params = Params::new();
        if let Some(start) = start {
            params.push(("start", start.to_string()));
        }
        if let Some(end) = end {
            params.push(("end", end.to_string()));
        }
        self.ctx.get("/v2/calendar", &params).await
    }
}
