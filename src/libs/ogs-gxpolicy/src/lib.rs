//! NextGCore Gx Policy Translation Library
//!
//! PCEF side of the Gx interface (3GPP TS 29.212): translates between the
//! Diameter view of a policy exchange and the policy model used by the
//! session manager.
//! - RAR: rule install/remove, event triggers, usage monitoring, bearer QoS
//! - RAA: per-rule failure reports
//! - CCR-U: usage reports, radio access and IP-CAN type
//!
//! Charging-Rule-Base-Name resolution goes through a [`RuleDirectory`] and
//! flow description parsing through a [`FlowParser`], both supplied by the
//! caller.

pub mod error;
pub mod timestamp;
pub mod gx;
pub mod policy;
pub mod flow;
pub mod rule;
pub mod event_trigger;
pub mod usage_monitor;
pub mod directory;
pub mod rule_install;
pub mod reauth;
pub mod ccr;
pub mod config;


pub use error::*;
pub use config::*;
pub use timestamp::{convert_to_timestamp, Timestamp};
pub use directory::{RuleDirectory, StaticRuleDirectory};
pub use flow::{build_flow_list, FlowParser, IpFilterRuleParser};
pub use event_trigger::event_triggers_related_info;
pub use usage_monitor::usage_monitoring_credits;
pub use rule_install::{parse_rule_install_avps, parse_rule_remove_avps, RuleInstalls};
pub use ccr::{get_ip_can_type, get_rat_type, remove_imsi_prefix};
