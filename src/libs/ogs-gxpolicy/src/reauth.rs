//! Re-Auth-Request / Re-Auth-Answer translation
//!
//! A RAR from the PCRF becomes one policy re-authorization for the session
//! manager; its outcome becomes the RAA. The RAA Result-Code is always
//! DIAMETER_SUCCESS: rule failures travel only in Charging-Rule-Report AVPs.

use crate::directory::RuleDirectory;
use crate::error::GxPolicyResult;
use crate::event_trigger::event_triggers_related_info;
use crate::flow::FlowParser;
use crate::gx::{self, result_code, ChargingRuleReport, ReAuthAnswer, ReAuthRequest};
use crate::policy::{self, PolicyReAuthAnswer, PolicyReAuthRequest};
use crate::rule_install::{parse_rule_install_avps, parse_rule_remove_avps};
use crate::usage_monitor::usage_monitoring_credits;

impl ReAuthRequest {
    /// Build the policy re-authorization for session `sid` of subscriber `imsi`
    ///
    /// Fails only when the rule directory cannot be consulted.
    pub fn to_policy_reauth(
        &self,
        imsi: &str,
        sid: &str,
        directory: &dyn RuleDirectory,
        flow_parser: &dyn FlowParser,
    ) -> GxPolicyResult<PolicyReAuthRequest> {
        let rules_to_remove = parse_rule_remove_avps(directory, &self.rules_to_remove)?;
        let installs = parse_rule_install_avps(directory, flow_parser, &self.rules_to_install)?;
        let (event_triggers, revalidation_time) =
            event_triggers_related_info(&self.event_triggers, self.revalidation_time);
        let usage_monitoring_credits = usage_monitoring_credits(&self.usage_monitors);
        let qos_info = self.qos.as_ref().map(convert_qos_info);

        log::debug!(
            "RAR [{sid}] to policy re-auth: remove={} install={} dynamic={} triggers={} monitors={}",
            rules_to_remove.len(),
            installs.static_rules.len(),
            installs.dynamic_rules.len(),
            event_triggers.len(),
            usage_monitoring_credits.len()
        );

        Ok(PolicyReAuthRequest {
            session_id: sid.to_string(),
            imsi: imsi.to_string(),
            rules_to_remove,
            rules_to_install: installs.static_rules,
            dynamic_rules_to_install: installs.dynamic_rules,
            event_triggers,
            revalidation_time,
            usage_monitoring_credits,
            qos_info,
        })
    }
}

/// Bearer QoS of a RAR; QCI stays absent when the AVP is absent
fn convert_qos_info(qos: &gx::QosInformation) -> policy::QosInformation {
    policy::QosInformation {
        bearer_id: qos.bearer_identifier.clone(),
        qci: qos.qci,
    }
}

impl ReAuthAnswer {
    /// One Charging-Rule-Report per failed rule, Result-Code always success
    pub fn from_policy_answer(session_id: &str, answer: &PolicyReAuthAnswer) -> Self {
        let rule_reports: Vec<ChargingRuleReport> = answer
            .failed_rules
            .iter()
            .map(|(rule_name, &code)| ChargingRuleReport {
                rule_names: vec![rule_name.clone()],
                failure_code: code.into(),
            })
            .collect();

        if !rule_reports.is_empty() {
            log::info!(
                "RAA [{session_id}]: {} rules failed to apply",
                rule_reports.len()
            );
        }

        ReAuthAnswer {
            session_id: session_id.to_string(),
            result_code: result_code::DIAMETER_SUCCESS,
            rule_reports,
        }
    }
}
