//! Canonical policy model
//!
//! Structures exchanged with the session manager: policy rules, rule
//! installs, re-authorization requests/answers and usage monitoring
//! updates. Everything here is built per message and owned by the caller.

use std::collections::BTreeMap;
use std::net::IpAddr;

use bytes::Bytes;

use crate::timestamp::Timestamp;

// ============================================================================
// Policy rules
// ============================================================================

/// Which charging systems track a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrackingType {
    /// Monitored by both the OCS (rating group) and the PCRF (monitoring key)
    OcsAndPcrf,
    /// Monitored by the PCRF only
    OnlyPcrf,
    /// Monitored by the OCS only
    OnlyOcs,
    #[default]
    NoTracking,
}

impl TrackingType {
    /// Classify from presence of a monitoring key and a rating group
    pub fn classify(monitoring_key_present: bool, rating_group_present: bool) -> Self {
        match (monitoring_key_present, rating_group_present) {
            (true, true) => TrackingType::OcsAndPcrf,
            (true, false) => TrackingType::OnlyPcrf,
            (false, true) => TrackingType::OnlyOcs,
            (false, false) => TrackingType::NoTracking,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedirectSupport {
    #[default]
    Disabled,
    Enabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedirectAddressType {
    #[default]
    Ipv4,
    Ipv6,
    Url,
    SipUri,
}

/// Redirect block of a policy rule
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RedirectInformation {
    pub support: RedirectSupport,
    pub address_type: RedirectAddressType,
    pub server_address: String,
}

/// Per-rule QoS; absent source fields are carried as zero
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlowQos {
    pub max_req_bw_ul: u32,
    pub max_req_bw_dl: u32,
    pub gbr_ul: u32,
    pub gbr_dl: u32,
    pub qci: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowAction {
    #[default]
    Permit,
    Deny,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowDirection {
    /// UE to network ("out" in an IPFilterRule)
    #[default]
    Uplink,
    /// Network to UE ("in" in an IPFilterRule)
    Downlink,
}

/// IP address with prefix length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IpPrefix {
    pub addr: IpAddr,
    pub prefix_len: u8,
}

/// Inclusive port range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRange {
    pub low: u16,
    pub high: u16,
}

impl PortRange {
    pub fn single(port: u16) -> Self {
        Self { low: port, high: port }
    }

    pub fn range(low: u16, high: u16) -> Self {
        Self { low, high }
    }

    pub fn is_single(&self) -> bool {
        self.low == self.high
    }
}

/// Match part of a flow description; `None` means "any"
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlowMatch {
    pub direction: FlowDirection,
    /// IP protocol number, 0 for any
    pub ip_proto: u8,
    pub ip_src: Option<IpPrefix>,
    pub ip_dst: Option<IpPrefix>,
    pub src_port: Option<PortRange>,
    pub dst_port: Option<PortRange>,
}

/// Structured traffic flow filter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlowDescription {
    pub flow_match: FlowMatch,
    pub action: FlowAction,
}

/// Policy rule as handed to the session manager
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PolicyRule {
    pub id: String,
    /// 0 when the source rule has no rating group
    pub rating_group: u32,
    /// Empty when the source rule has no monitoring key
    pub monitoring_key: Bytes,
    pub priority: u32,
    pub redirect: Option<RedirectInformation>,
    pub flow_list: Vec<FlowDescription>,
    pub qos: Option<FlowQos>,
    pub tracking_type: TrackingType,
}

/// Install of a pre-provisioned rule by id
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StaticRuleInstall {
    pub rule_id: String,
    pub activation_time: Option<Timestamp>,
    pub deactivation_time: Option<Timestamp>,
}

/// Install of a rule defined inline by the PCRF
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DynamicRuleInstall {
    pub policy_rule: PolicyRule,
    pub activation_time: Option<Timestamp>,
    pub deactivation_time: Option<Timestamp>,
}

// ============================================================================
// Event triggers and usage monitoring
// ============================================================================

/// Event trigger understood by the session manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyEventTrigger {
    /// The source trigger has no policy model equivalent
    Unsupported,
    RevalidationTimeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonitoringLevel {
    #[default]
    SessionLevel,
    PccRuleLevel,
    AdcRuleLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreditAction {
    #[default]
    Continue,
    Disable,
}

/// One volume bucket of granted credit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CreditUnit {
    pub is_valid: bool,
    pub volume: u64,
}

impl CreditUnit {
    pub fn valid(volume: u64) -> Self {
        Self {
            is_valid: true,
            volume,
        }
    }
}

/// Granted volume per direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GrantedUnits {
    pub total: CreditUnit,
    /// Uplink (input octets)
    pub tx: CreditUnit,
    /// Downlink (output octets)
    pub rx: CreditUnit,
}

/// Usage monitoring instruction for one monitoring key
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UsageMonitoringCredit {
    pub action: CreditAction,
    pub monitoring_key: Bytes,
    /// Only present with `CreditAction::Continue`
    pub granted_units: Option<GrantedUnits>,
    pub level: MonitoringLevel,
}

/// Usage counters reported by the session manager
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UsageMonitorUpdate {
    pub monitoring_key: Bytes,
    pub level: MonitoringLevel,
    pub bytes_tx: u64,
    pub bytes_rx: u64,
}

/// Radio access technology as reported by the session manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatType {
    #[default]
    TgppLte,
    TgppWlan,
    /// Any value this layer does not know
    Unrecognized(i32),
}

impl From<i32> for RatType {
    fn from(value: i32) -> Self {
        match value {
            0 => RatType::TgppLte,
            1 => RatType::TgppWlan,
            other => RatType::Unrecognized(other),
        }
    }
}

/// Usage monitoring update event that triggers a CCR-U
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UsageMonitoringUpdateRequest {
    pub update: UsageMonitorUpdate,
    pub session_id: String,
    pub request_number: u32,
    /// Subscriber id, normally "IMSI" followed by the digits
    pub sid: String,
    pub ue_ipv4: String,
    pub hardware_addr: Bytes,
    pub rat_type: RatType,
}

/// Session-level QoS request from the session manager
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QosInformationRequest {
    pub apn_ambr_dl: u32,
    pub apn_ambr_ul: u32,
    pub qos_class_id: u32,
    pub priority_level: u32,
    pub preemption_capability: u32,
    pub preemption_vulnerability: u32,
}

// ============================================================================
// Re-authorization
// ============================================================================

/// Bearer QoS carried with a re-authorization
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QosInformation {
    pub bearer_id: String,
    pub qci: Option<u32>,
}

/// Re-authorization directive for the session manager
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PolicyReAuthRequest {
    pub session_id: String,
    pub imsi: String,
    pub rules_to_remove: Vec<String>,
    pub rules_to_install: Vec<StaticRuleInstall>,
    pub dynamic_rules_to_install: Vec<DynamicRuleInstall>,
    pub event_triggers: Vec<PolicyEventTrigger>,
    pub revalidation_time: Option<Timestamp>,
    pub usage_monitoring_credits: Vec<UsageMonitoringCredit>,
    pub qos_info: Option<QosInformation>,
}

/// Outcome of a re-authorization as applied by the session manager
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PolicyReAuthAnswer {
    pub session_id: String,
    /// Rule name to Rule-Failure-Code; empty on full success
    pub failed_rules: BTreeMap<String, u32>,
}
