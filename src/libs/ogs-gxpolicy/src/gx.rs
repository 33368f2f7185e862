//! Gx Interface structures - PCEF side (3GPP TS 29.212)
//!
//! Decoded forms of the Gx messages this layer consumes and produces:
//! - Re-Auth-Request/Answer (RAR/RAA) from/to the PCRF
//! - Credit-Control-Request (CCR-U) towards the PCRF
//!
//! AVP encoding and decoding of these structures is done by `ogs-diameter`.

use std::time::SystemTime;

use bytes::Bytes;

/// Diameter Result-Code values used on Gx answers
pub mod result_code {
    pub const DIAMETER_SUCCESS: u32 = 2001;
}

// ============================================================================
// Charging rules
// ============================================================================

/// Redirect-Support values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum RedirectSupport {
    #[default]
    Disabled = 0,
    Enabled = 1,
}

/// Redirect-Address-Type values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum RedirectAddressType {
    #[default]
    Ipv4Address = 0,
    Ipv6Address = 1,
    Url = 2,
    SipUri = 3,
}

/// Redirect-Information AVP
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RedirectInformation {
    pub redirect_support: RedirectSupport,
    pub redirect_address_type: RedirectAddressType,
    pub redirect_server_address: String,
}

/// Flow-Information AVP
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlowInformation {
    pub flow_description: String,
}

/// QoS-Information AVP
///
/// Every bandwidth and QCI field is optional on the wire; an absent AVP is
/// not the same as an explicit zero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QosInformation {
    pub bearer_identifier: String,
    pub max_req_bw_ul: Option<u32>,
    pub max_req_bw_dl: Option<u32>,
    pub gbr_ul: Option<u32>,
    pub gbr_dl: Option<u32>,
    pub qci: Option<u32>,
}

/// Charging-Rule-Definition AVP
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleDefinition {
    pub rule_name: String,
    pub rating_group: Option<u32>,
    /// Monitoring-Key (OctetString); empty when the AVP is absent
    pub monitoring_key: Bytes,
    pub precedence: u32,
    pub redirect_information: Option<RedirectInformation>,
    pub flow_descriptions: Vec<String>,
    pub flow_informations: Vec<FlowInformation>,
    pub qos: Option<QosInformation>,
}

/// Charging-Rule-Install AVP
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleInstallAvp {
    pub rule_names: Vec<String>,
    pub rule_base_names: Vec<String>,
    pub rule_definitions: Vec<RuleDefinition>,
    pub rule_activation_time: Option<SystemTime>,
    pub rule_deactivation_time: Option<SystemTime>,
}

/// Charging-Rule-Remove AVP
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleRemoveAvp {
    pub rule_names: Vec<String>,
    pub rule_base_names: Vec<String>,
}

// ============================================================================
// Event triggers
// ============================================================================

/// Event-Trigger values (3GPP TS 29.212 section 5.3.7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTrigger {
    SgsnChange,
    QosChange,
    RatChange,
    TftChange,
    PlmnChange,
    LossOfBearer,
    RecoveryOfBearer,
    IpCanChange,
    UserLocationChange,
    NoEventTriggers,
    OutOfCredit,
    ReallocationOfCredit,
    RevalidationTimeout,
    UeIpAddressAllocate,
    UeIpAddressRelease,
    DefaultEpsBearerQosChange,
    AnGwChange,
    UeTimeZoneChange,
    UsageReport,
    /// Any value without a named variant
    Other(u32),
}

impl EventTrigger {
    /// Wire value of the trigger
    pub fn code(&self) -> u32 {
        match self {
            EventTrigger::SgsnChange => 0,
            EventTrigger::QosChange => 1,
            EventTrigger::RatChange => 2,
            EventTrigger::TftChange => 3,
            EventTrigger::PlmnChange => 4,
            EventTrigger::LossOfBearer => 5,
            EventTrigger::RecoveryOfBearer => 6,
            EventTrigger::IpCanChange => 7,
            EventTrigger::UserLocationChange => 13,
            EventTrigger::NoEventTriggers => 14,
            EventTrigger::OutOfCredit => 15,
            EventTrigger::ReallocationOfCredit => 16,
            EventTrigger::RevalidationTimeout => 17,
            EventTrigger::UeIpAddressAllocate => 18,
            EventTrigger::UeIpAddressRelease => 19,
            EventTrigger::DefaultEpsBearerQosChange => 20,
            EventTrigger::AnGwChange => 21,
            EventTrigger::UeTimeZoneChange => 25,
            EventTrigger::UsageReport => 33,
            EventTrigger::Other(code) => *code,
        }
    }
}

impl From<u32> for EventTrigger {
    fn from(value: u32) -> Self {
        match value {
            0 => EventTrigger::SgsnChange,
            1 => EventTrigger::QosChange,
            2 => EventTrigger::RatChange,
            3 => EventTrigger::TftChange,
            4 => EventTrigger::PlmnChange,
            5 => EventTrigger::LossOfBearer,
            6 => EventTrigger::RecoveryOfBearer,
            7 => EventTrigger::IpCanChange,
            13 => EventTrigger::UserLocationChange,
            14 => EventTrigger::NoEventTriggers,
            15 => EventTrigger::OutOfCredit,
            16 => EventTrigger::ReallocationOfCredit,
            17 => EventTrigger::RevalidationTimeout,
            18 => EventTrigger::UeIpAddressAllocate,
            19 => EventTrigger::UeIpAddressRelease,
            20 => EventTrigger::DefaultEpsBearerQosChange,
            21 => EventTrigger::AnGwChange,
            25 => EventTrigger::UeTimeZoneChange,
            33 => EventTrigger::UsageReport,
            other => EventTrigger::Other(other),
        }
    }
}

// ============================================================================
// Usage monitoring
// ============================================================================

/// Usage-Monitoring-Level values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum MonitoringLevel {
    #[default]
    SessionLevel = 0,
    PccRuleLevel = 1,
    AdcRuleLevel = 2,
}

impl From<u32> for MonitoringLevel {
    fn from(value: u32) -> Self {
        match value {
            1 => MonitoringLevel::PccRuleLevel,
            2 => MonitoringLevel::AdcRuleLevel,
            _ => MonitoringLevel::SessionLevel,
        }
    }
}

/// Granted-Service-Unit AVP (volume part)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GrantedServiceUnit {
    pub total_octets: Option<u64>,
    pub input_octets: Option<u64>,
    pub output_octets: Option<u64>,
}

/// Usage-Monitoring-Information AVP received from the PCRF
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UsageMonitoringInfo {
    pub monitoring_key: Bytes,
    pub level: MonitoringLevel,
    pub granted_service_unit: Option<GrantedServiceUnit>,
}

/// Usage-Monitoring-Information AVP sent to the PCRF (Used-Service-Unit)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UsageReport {
    pub monitoring_key: Bytes,
    pub level: MonitoringLevel,
    pub input_octets: u64,
    pub output_octets: u64,
    pub total_octets: u64,
}

// ============================================================================
// Re-Auth-Request / Re-Auth-Answer
// ============================================================================

/// Rule-Failure-Code values (3GPP TS 29.212 section 5.3.38)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleFailureCode {
    UnknownRuleName,
    RatingGroupError,
    ServiceIdentifierError,
    GwPcefMalfunction,
    ResourcesLimitation,
    MaxNrBearersReached,
    UnknownBearerId,
    MissingBearerId,
    MissingFlowInformation,
    ResourceAllocationFailure,
    UnsuccessfulQosValidation,
    IncorrectFlowInformation,
    PsToCsHandover,
    TdfApplicationIdentifierError,
    NoBearerBound,
    FilterRestrictions,
    AnGwFailed,
    MissingRedirectServerAddress,
    /// Value without a named variant, kept as received
    Other(u32),
}

impl RuleFailureCode {
    pub fn code(&self) -> u32 {
        match self {
            RuleFailureCode::UnknownRuleName => 1,
            RuleFailureCode::RatingGroupError => 2,
            RuleFailureCode::ServiceIdentifierError => 3,
            RuleFailureCode::GwPcefMalfunction => 4,
            RuleFailureCode::ResourcesLimitation => 5,
            RuleFailureCode::MaxNrBearersReached => 6,
            RuleFailureCode::UnknownBearerId => 7,
            RuleFailureCode::MissingBearerId => 8,
            RuleFailureCode::MissingFlowInformation => 9,
            RuleFailureCode::ResourceAllocationFailure => 10,
            RuleFailureCode::UnsuccessfulQosValidation => 11,
            RuleFailureCode::IncorrectFlowInformation => 12,
            RuleFailureCode::PsToCsHandover => 13,
            RuleFailureCode::TdfApplicationIdentifierError => 14,
            RuleFailureCode::NoBearerBound => 15,
            RuleFailureCode::FilterRestrictions => 16,
            RuleFailureCode::AnGwFailed => 17,
            RuleFailureCode::MissingRedirectServerAddress => 18,
            RuleFailureCode::Other(code) => *code,
        }
    }
}

impl From<u32> for RuleFailureCode {
    fn from(value: u32) -> Self {
        match value {
            1 => RuleFailureCode::UnknownRuleName,
            2 => RuleFailureCode::RatingGroupError,
            3 => RuleFailureCode::ServiceIdentifierError,
            4 => RuleFailureCode::GwPcefMalfunction,
            5 => RuleFailureCode::ResourcesLimitation,
            6 => RuleFailureCode::MaxNrBearersReached,
            7 => RuleFailureCode::UnknownBearerId,
            8 => RuleFailureCode::MissingBearerId,
            9 => RuleFailureCode::MissingFlowInformation,
            10 => RuleFailureCode::ResourceAllocationFailure,
            11 => RuleFailureCode::UnsuccessfulQosValidation,
            12 => RuleFailureCode::IncorrectFlowInformation,
            13 => RuleFailureCode::PsToCsHandover,
            14 => RuleFailureCode::TdfApplicationIdentifierError,
            15 => RuleFailureCode::NoBearerBound,
            16 => RuleFailureCode::FilterRestrictions,
            17 => RuleFailureCode::AnGwFailed,
            18 => RuleFailureCode::MissingRedirectServerAddress,
            other => RuleFailureCode::Other(other),
        }
    }
}

/// Charging-Rule-Report AVP
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargingRuleReport {
    pub rule_names: Vec<String>,
    pub failure_code: RuleFailureCode,
}

/// Re-Auth-Request (RAR) from the PCRF
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReAuthRequest {
    pub session_id: String,
    pub rules_to_remove: Vec<RuleRemoveAvp>,
    pub rules_to_install: Vec<RuleInstallAvp>,
    pub event_triggers: Vec<EventTrigger>,
    pub revalidation_time: Option<SystemTime>,
    pub usage_monitors: Vec<UsageMonitoringInfo>,
    pub qos: Option<QosInformation>,
}

/// Re-Auth-Answer (RAA) towards the PCRF
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReAuthAnswer {
    pub session_id: String,
    pub result_code: u32,
    pub rule_reports: Vec<ChargingRuleReport>,
}

// ============================================================================
// Credit-Control-Request
// ============================================================================

/// CC-Request-Type values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum CcRequestType {
    #[default]
    InitialRequest = 1,
    UpdateRequest = 2,
    TerminationRequest = 3,
    EventRequest = 4,
}

impl From<u32> for CcRequestType {
    fn from(value: u32) -> Self {
        match value {
            1 => CcRequestType::InitialRequest,
            2 => CcRequestType::UpdateRequest,
            3 => CcRequestType::TerminationRequest,
            4 => CcRequestType::EventRequest,
            _ => CcRequestType::InitialRequest,
        }
    }
}

/// RAT-Type values (3GPP TS 29.212 section 5.3.31)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum RatType {
    Wlan = 0,
    Virtual = 1,
    Utran = 1000,
    Geran = 1001,
    Gan = 1002,
    HspaEvolution = 1003,
    #[default]
    Eutran = 1004,
}

/// IP-CAN-Type values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum IpCanType {
    Gprs3Gpp = 0,
    Docsis = 1,
    XDsl = 2,
    WiMax = 3,
    Gpp2_3 = 4,
    #[default]
    Eps3Gpp = 5,
    Non3GppEps = 6,
}

/// QoS-Information AVP sent in a CCR
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QosRequestInfo {
    pub apn_agg_max_bit_rate_dl: u32,
    pub apn_agg_max_bit_rate_ul: u32,
    pub qos_class_identifier: u32,
    pub pri_level: u32,
    pub pre_capability: u32,
    pub pre_vulnerability: u32,
}

/// Credit-Control-Request (CCR) towards the PCRF
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreditControlRequest {
    pub session_id: String,
    pub request_number: u32,
    pub request_type: CcRequestType,
    pub imsi: String,
    pub ip_addr: String,
    pub hardware_addr: Bytes,
    pub usage_reports: Vec<UsageReport>,
    pub rat_type: RatType,
    pub ip_can_type: IpCanType,
    pub qos_info: Option<QosRequestInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_trigger_conversion() {
        assert_eq!(EventTrigger::from(17), EventTrigger::RevalidationTimeout);
        assert_eq!(EventTrigger::from(33), EventTrigger::UsageReport);
        assert_eq!(EventTrigger::from(999), EventTrigger::Other(999));
        assert_eq!(EventTrigger::RevalidationTimeout.code(), 17);
        assert_eq!(EventTrigger::Other(999).code(), 999);
    }

    #[test]
    fn test_rule_failure_code_keeps_unknown_values() {
        assert_eq!(RuleFailureCode::from(5), RuleFailureCode::ResourcesLimitation);
        assert_eq!(RuleFailureCode::from(5).code(), 5);
        assert_eq!(RuleFailureCode::from(42), RuleFailureCode::Other(42));
        assert_eq!(RuleFailureCode::from(42).code(), 42);
    }

    #[test]
    fn test_cc_request_type_conversion() {
        assert_eq!(CcRequestType::from(1), CcRequestType::InitialRequest);
        assert_eq!(CcRequestType::from(2), CcRequestType::UpdateRequest);
        assert_eq!(CcRequestType::from(3), CcRequestType::TerminationRequest);
        assert_eq!(CcRequestType::from(4), CcRequestType::EventRequest);
        assert_eq!(CcRequestType::from(99), CcRequestType::InitialRequest);
    }

    #[test]
    fn test_monitoring_level_conversion() {
        assert_eq!(MonitoringLevel::from(0), MonitoringLevel::SessionLevel);
        assert_eq!(MonitoringLevel::from(1), MonitoringLevel::PccRuleLevel);
        assert_eq!(MonitoringLevel::from(2), MonitoringLevel::AdcRuleLevel);
    }

    #[test]
    fn test_rat_and_ip_can_type_values() {
        assert_eq!(RatType::Eutran as u32, 1004);
        assert_eq!(RatType::Wlan as u32, 0);
        assert_eq!(IpCanType::Eps3Gpp as u32, 5);
        assert_eq!(IpCanType::Non3GppEps as u32, 6);
    }
}
