//! Per-account fixed-window rate limiting for outbound transfers.
//!
//! A window opens at the first transfer and lasts `window_seconds`; once it has
//! elapsed the next transfer opens a fresh window. Up to `2 * max_per_window`
//! transfers can land across a window boundary.

use cosmwasm_std::{Addr, Storage};

use crate::error::ContractError;
use crate::state::{RateLimitConfig, RateWindow, RATE_LIMIT, RATE_WINDOWS};

/// Both bounds must be positive.
pub fn validate_rate_limit(
    window_seconds: u64,
    max_per_window: u32,
) -> Result<RateLimitConfig, ContractError> {
    if window_seconds == 0 {
        return Err(ContractError::InvalidRateLimit {
            reason: "window_seconds must be positive".to_string(),
        });
    }
    if max_per_window == 0 {
        return Err(ContractError::InvalidRateLimit {
            reason: "max_per_window must be positive".to_string(),
        });
    }
    Ok(RateLimitConfig {
        window_seconds,
        max_per_window,
    })
}

/// The window as it applies at `now`: reset if the boundary was crossed.
pub fn current_window(window: Option<RateWindow>, window_seconds: u64, now: u64) -> RateWindow {
    match window {
        Some(w) if now.saturating_sub(w.window_start) < window_seconds => w,
        _ => RateWindow {
            window_start: now,
            count_in_window: 0,
        },
    }
}

/// Block time at which `window` expires
pub fn window_ends_at(window: &RateWindow, window_seconds: u64) -> u64 {
    window.window_start.saturating_add(window_seconds)
}

/// Count one transfer against `window`, or `None` if the budget is spent.
pub fn try_consume(
    window: Option<RateWindow>,
    limit: &RateLimitConfig,
    now: u64,
) -> Option<RateWindow> {
    let mut window = current_window(window, limit.window_seconds, now);
    if window.count_in_window + 1 > limit.max_per_window {
        return None;
    }
    window.count_in_window += 1;
    Some(window)
}

/// Check `account`'s budget and consume one transfer from it.
pub fn check_and_consume(
    storage: &mut dyn Storage,
    account: &Addr,
    now: u64,
) -> Result<RateWindow, ContractError> {
    let limit = RATE_LIMIT.load(storage)?;
    let previous = RATE_WINDOWS.may_load(storage, account)?;

    let Some(window) = try_consume(previous.clone(), &limit, now) else {
        let rejected = current_window(previous, limit.window_seconds, now);
        return Err(ContractError::RateLimitExceeded {
            account: account.to_string(),
            max_per_window: limit.max_per_window,
            window_ends_at: window_ends_at(&rejected, limit.window_seconds),
        });
    };

    RATE_WINDOWS.save(storage, account, &window)?;
    Ok(window)
}
