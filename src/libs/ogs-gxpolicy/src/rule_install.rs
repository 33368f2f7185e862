//! Charging-Rule-Install / Charging-Rule-Remove expansion
//!
//! Both directives name rules explicitly, by base name (resolved through the
//! rule directory), or, for installs, by full definition. Expansion flattens
//! them into ordered rule id lists and typed install records.

use crate::directory::RuleDirectory;
use crate::error::{GxPolicyError, GxPolicyResult};
use crate::flow::FlowParser;
use crate::gx::{RuleInstallAvp, RuleRemoveAvp};
use crate::policy::{DynamicRuleInstall, StaticRuleInstall};
use crate::timestamp::convert_to_timestamp;

/// Result of expanding Charging-Rule-Install AVPs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleInstalls {
    pub static_rules: Vec<StaticRuleInstall>,
    pub dynamic_rules: Vec<DynamicRuleInstall>,
}

/// Resolve base names with a single directory call
///
/// No call is made for an empty list. A failing directory is reported, an
/// empty resolution is not.
fn resolve_base_names(
    directory: &dyn RuleDirectory,
    base_names: &[String],
) -> GxPolicyResult<Vec<String>> {
    if base_names.is_empty() {
        return Ok(Vec::new());
    }

    directory
        .rule_ids_for_base_names(base_names)
        .map_err(|source| {
            log::error!("Rule directory lookup failed for base names {base_names:?}: {source}");
            GxPolicyError::DirectoryLookup {
                base_names: base_names.to_vec(),
                source,
            }
        })
}

/// Expand Charging-Rule-Install AVPs
///
/// Every install produced from one AVP carries that AVP's activation and
/// deactivation time. Within an AVP, explicit rule names come first, then
/// base name members, then dynamic rules; AVP order is preserved.
pub fn parse_rule_install_avps(
    directory: &dyn RuleDirectory,
    flow_parser: &dyn FlowParser,
    rule_installs: &[RuleInstallAvp],
) -> GxPolicyResult<RuleInstalls> {
    let mut installs = RuleInstalls {
        static_rules: Vec::with_capacity(rule_installs.len()),
        dynamic_rules: Vec::with_capacity(rule_installs.len()),
    };

    for rule_install in rule_installs {
        let activation_time = convert_to_timestamp(rule_install.rule_activation_time);
        let deactivation_time = convert_to_timestamp(rule_install.rule_deactivation_time);

        let base_name_rule_ids = resolve_base_names(directory, &rule_install.rule_base_names)?;

        installs.static_rules.extend(
            rule_install
                .rule_names
                .iter()
                .chain(base_name_rule_ids.iter())
                .map(|rule_id| StaticRuleInstall {
                    rule_id: rule_id.clone(),
                    activation_time,
                    deactivation_time,
                }),
        );

        installs
            .dynamic_rules
            .extend(rule_install.rule_definitions.iter().map(|definition| {
                DynamicRuleInstall {
                    policy_rule: definition.to_policy_rule(flow_parser),
                    activation_time,
                    deactivation_time,
                }
            }));
    }

    log::debug!(
        "Expanded {} rule install AVPs into {} static and {} dynamic installs",
        rule_installs.len(),
        installs.static_rules.len(),
        installs.dynamic_rules.len()
    );

    Ok(installs)
}

/// Expand Charging-Rule-Remove AVPs into one ordered list of rule ids
///
/// Explicit rule names of all AVPs come first, followed by the base name
/// members of each AVP in AVP order.
pub fn parse_rule_remove_avps(
    directory: &dyn RuleDirectory,
    rule_removes: &[RuleRemoveAvp],
) -> GxPolicyResult<Vec<String>> {
    let mut rule_ids: Vec<String> = rule_removes
        .iter()
        .flat_map(|rule_remove| rule_remove.rule_names.iter().cloned())
        .collect();

    for rule_remove in rule_removes {
        rule_ids.extend(resolve_base_names(directory, &rule_remove.rule_base_names)?);
    }

    log::debug!(
        "Expanded {} rule remove AVPs into {} rule ids",
        rule_removes.len(),
        rule_ids.len()
    );

    Ok(rule_ids)
}
