//! Signed-sum strategies
//!
//! A strategy is a table of filter/sign terms. Terms are evaluated as
//! independent sequential count queries and summed in `i64`; the queries
//! are not transactional against the upstream, so the aggregate is a
//! best-effort snapshot and can go negative when the counts race
//! concurrent order mutations.

use shopify_admin::{FinancialStatus, FulfillmentStatus, OrderFilter, OrdersApi};

use crate::error::AppError;
use crate::window::Window;

/// One count query and its contribution sign
#[derive(Debug, Clone, Copy)]
pub struct SignedTerm {
    pub sign: i64,
    pub financial: Option<FinancialStatus>,
    pub fulfillment: Option<FulfillmentStatus>,
}

impl SignedTerm {
    const fn add(financial: Option<FinancialStatus>, fulfillment: Option<FulfillmentStatus>) -> Self {
        Self {
            sign: 1,
            financial,
            fulfillment,
        }
    }

    const fn subtract(
        financial: Option<FinancialStatus>,
        fulfillment: Option<FulfillmentStatus>,
    ) -> Self {
        Self {
            sign: -1,
            financial,
            fulfillment,
        }
    }

    fn filter(&self, window: &Window) -> OrderFilter {
        let mut filter = OrderFilter::in_window(&window.created_at_min, &window.created_at_max);
        if let Some(financial) = self.financial {
            filter = filter.financial(financial);
        }
        if let Some(fulfillment) = self.fulfillment {
            filter = filter.fulfillment(fulfillment);
        }
        filter
    }
}

/// `(paid + pending) - (refunded + voided + cancelled)`, all financial
pub const NET_PAID: [SignedTerm; 5] = [
    SignedTerm::add(Some(FinancialStatus::Paid), None),
    SignedTerm::add(Some(FinancialStatus::Pending), None),
    SignedTerm::subtract(Some(FinancialStatus::Refunded), None),
    SignedTerm::subtract(Some(FinancialStatus::Voided), None),
    SignedTerm::subtract(Some(FinancialStatus::Cancelled), None),
];

/// Paid, minus cancelled fulfillments and refunds, plus paid-and-fulfilled
pub const FULFILLMENT_ADJUSTED: [SignedTerm; 4] = [
    SignedTerm::add(Some(FinancialStatus::Paid), None),
    SignedTerm::subtract(None, Some(FulfillmentStatus::Cancelled)),
    SignedTerm::subtract(Some(FinancialStatus::Refunded), None),
    SignedTerm::add(Some(FinancialStatus::Paid), Some(FulfillmentStatus::Fulfilled)),
];

/// Issue one count query per term, in table order, and sum the signed counts.
pub async fn evaluate(
    api: &dyn OrdersApi,
    window: &Window,
    terms: &[SignedTerm],
) -> Result<i64, AppError> {
    let mut total = 0i64;
    for term in terms {
        let count = api.count_orders(&term.filter(window)).await?;
        total += term.sign * count;
    }
    Ok(total)
}
