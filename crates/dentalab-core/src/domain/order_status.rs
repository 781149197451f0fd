// ============================================================================
// Dentalab Core - Order Status Workflow
// File: crates/dentalab-core/src/domain/order_status.rs
// Description: Order status enumeration and its transition table
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Workflow state of a work order.
///
/// ```text
/// received -> in_production -> quality_check -> ready -> delivered
///                  ^                 |            |
///                  |                 v            |
///                  +------------ revision <-------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Received,
    InProduction,
    QualityCheck,
    Ready,
    Delivered,
    Revision,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Received,
        OrderStatus::InProduction,
        OrderStatus::QualityCheck,
        OrderStatus::Ready,
        OrderStatus::Delivered,
        OrderStatus::Revision,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Received => "received",
            OrderStatus::InProduction => "in_production",
            OrderStatus::QualityCheck => "quality_check",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Revision => "revision",
        }
    }

    /// Wire-boundary parse. Unrecognized values are rejected, never defaulted.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        s.parse()
    }

    /// Targets reachable in one step. A status never lists itself.
    pub fn allowed_transitions(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Received => &[OrderStatus::InProduction],
            OrderStatus::InProduction => &[OrderStatus::QualityCheck],
            OrderStatus::QualityCheck => &[OrderStatus::Ready, OrderStatus::Revision],
            OrderStatus::Ready => &[OrderStatus::Delivered, OrderStatus::Revision],
            OrderStatus::Revision => &[OrderStatus::InProduction],
            OrderStatus::Delivered => &[],
        }
    }

    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        self.allowed_transitions().contains(&target)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Received
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::UnknownStatus(s.to_string()))
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
