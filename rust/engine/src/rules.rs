use crate::logger::Resolution;
use crate::player::Action as A;

/// Resolves a sampled action into the chips it moves.
///
/// Raises are sized as the amount to call plus one pot-sized bet, capped at
/// the stack. A raise that cannot exceed the call amount is played as a call,
/// and a call the stack cannot cover becomes an all-in for the whole stack
/// with the uncovered part refunded to the opponent.
///
/// # Arguments
///
/// * `action` - The action sampled from the strategy's distribution
/// * `stack` - Acting player's remaining chip stack
/// * `to_call` - Amount needed to match the opponent's wager
/// * `pot` - Pot before the action, including both current wagers
///
/// # Examples
///
/// ```
/// use headsup_engine::logger::Resolution;
/// use headsup_engine::player::Action;
/// use headsup_engine::rules::resolve_action;
///
/// // Pot-sized raise: call 50 then bet the 150 pot
/// assert_eq!(resolve_action(Action::Raise, 1000, 50, 150), Resolution::Raise { amount: 200 });
///
/// // Short call refunds what the stack cannot match
/// assert_eq!(
///     resolve_action(Action::Call, 80, 200, 500),
///     Resolution::AllInCall { amount: 80, refund: 120 }
/// );
///
/// // A raise that cannot beat the call is played as that call
/// assert_eq!(
///     resolve_action(Action::Raise, 80, 200, 500),
///     Resolution::AllInCall { amount: 80, refund: 120 }
/// );
/// ```
pub fn resolve_action(action: A, stack: u32, to_call: u32, pot: u32) -> Resolution {
    match action {
        A::Fold => Resolution::Fold,
        A::Call => resolve_call(stack, to_call),
        A::Raise => {
            let amount = to_call.saturating_add(pot).min(stack);
            if amount <= to_call {
                resolve_call(stack, to_call)
            } else {
                Resolution::Raise { amount }
            }
        }
    }
}

fn resolve_call(stack: u32, to_call: u32) -> Resolution {
    if to_call == 0 {
        Resolution::Check
    } else if to_call > stack {
        Resolution::AllInCall {
            amount: stack,
            refund: to_call - stack,
        }
    } else {
        Resolution::Call { amount: to_call }
    }
}
