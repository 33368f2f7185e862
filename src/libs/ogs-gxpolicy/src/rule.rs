//! Charging-Rule-Definition to policy rule translation

use crate::flow::{build_flow_list, FlowParser};
use crate::gx::{self, QosInformation, RuleDefinition};
use crate::policy::{self, FlowQos, PolicyRule, TrackingType};

impl From<gx::RedirectSupport> for policy::RedirectSupport {
    fn from(support: gx::RedirectSupport) -> Self {
        match support {
            gx::RedirectSupport::Disabled => policy::RedirectSupport::Disabled,
            gx::RedirectSupport::Enabled => policy::RedirectSupport::Enabled,
        }
    }
}

impl From<gx::RedirectAddressType> for policy::RedirectAddressType {
    fn from(address_type: gx::RedirectAddressType) -> Self {
        match address_type {
            gx::RedirectAddressType::Ipv4Address => policy::RedirectAddressType::Ipv4,
            gx::RedirectAddressType::Ipv6Address => policy::RedirectAddressType::Ipv6,
            gx::RedirectAddressType::Url => policy::RedirectAddressType::Url,
            gx::RedirectAddressType::SipUri => policy::RedirectAddressType::SipUri,
        }
    }
}

impl RuleDefinition {
    /// Translate into the policy rule handed to the session manager
    ///
    /// Never fails: missing optional parts are left out and unparsable flow
    /// descriptions are dropped.
    pub fn to_policy_rule(&self, flow_parser: &dyn FlowParser) -> PolicyRule {
        PolicyRule {
            id: self.rule_name.clone(),
            rating_group: self.rating_group.unwrap_or(0),
            // Monitoring-Key is already an OctetString, no conversion needed
            monitoring_key: self.monitoring_key.clone(),
            priority: self.precedence,
            redirect: self.redirect_info(),
            flow_list: build_flow_list(
                flow_parser,
                &self.flow_descriptions,
                &self.flow_informations,
            ),
            qos: self.qos.as_ref().map(QosInformation::to_flow_qos),
            tracking_type: self.tracking_type(),
        }
    }

    pub fn tracking_type(&self) -> TrackingType {
        TrackingType::classify(!self.monitoring_key.is_empty(), self.rating_group.is_some())
    }

    pub fn redirect_info(&self) -> Option<policy::RedirectInformation> {
        self.redirect_information
            .as_ref()
            .map(|redirect| policy::RedirectInformation {
                support: redirect.redirect_support.into(),
                address_type: redirect.redirect_address_type.into(),
                server_address: redirect.redirect_server_address.clone(),
            })
    }
}

impl QosInformation {
    /// Per-rule QoS; absent fields fall back to zero
    pub fn to_flow_qos(&self) -> FlowQos {
        FlowQos {
            max_req_bw_ul: self.max_req_bw_ul.unwrap_or(0),
            max_req_bw_dl: self.max_req_bw_dl.unwrap_or(0),
            gbr_ul: self.gbr_ul.unwrap_or(0),
            gbr_dl: self.gbr_dl.unwrap_or(0),
            qci: self.qci.unwrap_or(0),
        }
    }
}
