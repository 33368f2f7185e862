//! Credit-Control-Request building

use crate::gx::{CcRequestType, CreditControlRequest, IpCanType, QosRequestInfo, RatType, UsageReport};
use crate::policy::{self, QosInformationRequest, UsageMonitoringUpdateRequest};

/// Strip the subscriber id prefix, leaving the IMSI digits
pub fn remove_imsi_prefix<'a>(sid: &'a str, prefix: &str) -> &'a str {
    sid.strip_prefix(prefix).unwrap_or(sid)
}

/// RAT-Type for a session manager radio access type
///
/// Unrecognized access types are reported as EUTRAN.
pub fn get_rat_type(rat_type: policy::RatType) -> RatType {
    match rat_type {
        policy::RatType::TgppLte => RatType::Eutran,
        policy::RatType::TgppWlan => RatType::Wlan,
        policy::RatType::Unrecognized(_) => RatType::Eutran,
    }
}

/// IP-CAN-Type inferred from the radio access type
///
/// The session manager does not report an IP-CAN type and only LTE and WLAN
/// are supported, so it is derived here. Unrecognized access types are
/// reported as non-3GPP, unlike the EUTRAN default of `get_rat_type`.
pub fn get_ip_can_type(rat_type: policy::RatType) -> IpCanType {
    match rat_type {
        policy::RatType::TgppLte => IpCanType::Eps3Gpp,
        policy::RatType::TgppWlan => IpCanType::Non3GppEps,
        policy::RatType::Unrecognized(_) => IpCanType::Non3GppEps,
    }
}

impl CreditControlRequest {
    /// CCR-U carrying a single usage report
    pub fn from_usage_monitor_update(update: &UsageMonitoringUpdateRequest, imsi_prefix: &str) -> Self {
        if let policy::RatType::Unrecognized(value) = update.rat_type {
            log::warn!(
                "Unrecognized RAT type {value} for session [{}], reporting EUTRAN over non-3GPP IP-CAN",
                update.session_id
            );
        }

        CreditControlRequest {
            session_id: update.session_id.clone(),
            request_number: update.request_number,
            request_type: CcRequestType::UpdateRequest,
            imsi: remove_imsi_prefix(&update.sid, imsi_prefix).to_string(),
            ip_addr: update.ue_ipv4.clone(),
            hardware_addr: update.hardware_addr.clone(),
            usage_reports: vec![UsageReport::from_usage_monitor_update(&update.update)],
            rat_type: get_rat_type(update.rat_type),
            ip_can_type: get_ip_can_type(update.rat_type),
            qos_info: None,
        }
    }
}

impl QosRequestInfo {
    pub fn from_policy(qos: &QosInformationRequest) -> Self {
        QosRequestInfo {
            apn_agg_max_bit_rate_dl: qos.apn_ambr_dl,
            apn_agg_max_bit_rate_ul: qos.apn_ambr_ul,
            qos_class_identifier: qos.qos_class_id,
            pri_level: qos.priority_level,
            pre_capability: qos.preemption_capability,
            pre_vulnerability: qos.preemption_vulnerability,
        }
    }
}
