//! Event-Trigger mapping

use std::time::SystemTime;

use crate::gx::EventTrigger;
use crate::policy::PolicyEventTrigger;
use crate::timestamp::{convert_to_timestamp, Timestamp};

/// Gx triggers with a policy model equivalent
static EVENT_TRIGGER_TABLE: &[(EventTrigger, PolicyEventTrigger)] = &[(
    EventTrigger::RevalidationTimeout,
    PolicyEventTrigger::RevalidationTimeout,
)];

/// Look up the policy model trigger for a Gx trigger
pub fn convert_event_trigger(trigger: EventTrigger) -> Option<PolicyEventTrigger> {
    EVENT_TRIGGER_TABLE
        .iter()
        .find(|(gx, _)| *gx == trigger)
        .map(|(_, policy)| *policy)
}

/// Map RAR event triggers and pick up the revalidation time
///
/// Produces exactly one output trigger per input trigger, in order; unknown
/// triggers become `PolicyEventTrigger::Unsupported`. The revalidation time
/// is only carried when REVALIDATION_TIMEOUT is among the triggers.
pub fn event_triggers_related_info(
    event_triggers: &[EventTrigger],
    revalidation_time: Option<SystemTime>,
) -> (Vec<PolicyEventTrigger>, Option<Timestamp>) {
    let mut policy_triggers = Vec::with_capacity(event_triggers.len());
    let mut policy_revalidation_time = None;

    for &trigger in event_triggers {
        match convert_event_trigger(trigger) {
            Some(converted) => {
                policy_triggers.push(converted);
                if trigger == EventTrigger::RevalidationTimeout {
                    policy_revalidation_time = convert_to_timestamp(revalidation_time);
                }
            }
            None => {
                log::warn!("Unsupported event trigger {} ({trigger:?})", trigger.code());
                policy_triggers.push(PolicyEventTrigger::Unsupported);
            }
        }
    }

    (policy_triggers, policy_revalidation_time)
}
