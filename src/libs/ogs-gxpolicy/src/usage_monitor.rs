//! Usage monitoring translation
//!
//! Usage-Monitoring-Information received in a RAR becomes a credit
//! instruction for the session manager; usage counters from the session
//! manager become a Used-Service-Unit report for the next CCR-U.

use crate::gx::{self, GrantedServiceUnit, UsageMonitoringInfo, UsageReport};
use crate::policy::{
    self, CreditAction, CreditUnit, GrantedUnits, UsageMonitorUpdate, UsageMonitoringCredit,
};

impl From<gx::MonitoringLevel> for policy::MonitoringLevel {
    fn from(level: gx::MonitoringLevel) -> Self {
        match level {
            gx::MonitoringLevel::SessionLevel => policy::MonitoringLevel::SessionLevel,
            gx::MonitoringLevel::PccRuleLevel => policy::MonitoringLevel::PccRuleLevel,
            gx::MonitoringLevel::AdcRuleLevel => policy::MonitoringLevel::AdcRuleLevel,
        }
    }
}

impl From<policy::MonitoringLevel> for gx::MonitoringLevel {
    fn from(level: policy::MonitoringLevel) -> Self {
        match level {
            policy::MonitoringLevel::SessionLevel => gx::MonitoringLevel::SessionLevel,
            policy::MonitoringLevel::PccRuleLevel => gx::MonitoringLevel::PccRuleLevel,
            policy::MonitoringLevel::AdcRuleLevel => gx::MonitoringLevel::AdcRuleLevel,
        }
    }
}

impl GrantedServiceUnit {
    /// True when no volume is granted: every field absent or zero
    pub fn is_empty(&self) -> bool {
        [self.total_octets, self.input_octets, self.output_octets]
            .iter()
            .all(|octets| octets.unwrap_or(0) == 0)
    }

    /// Present fields become valid credit units, absent ones stay invalid
    pub fn to_granted_units(&self) -> GrantedUnits {
        GrantedUnits {
            total: self.total_octets.map(CreditUnit::valid).unwrap_or_default(),
            tx: self.input_octets.map(CreditUnit::valid).unwrap_or_default(),
            rx: self.output_octets.map(CreditUnit::valid).unwrap_or_default(),
        }
    }
}

impl UsageMonitoringInfo {
    /// DISABLE when nothing is granted, otherwise CONTINUE with the grant
    pub fn to_usage_monitoring_credit(&self) -> UsageMonitoringCredit {
        let granted = self.granted_service_unit.filter(|gsu| !gsu.is_empty());

        match granted {
            None => UsageMonitoringCredit {
                action: CreditAction::Disable,
                monitoring_key: self.monitoring_key.clone(),
                granted_units: None,
                level: self.level.into(),
            },
            Some(gsu) => UsageMonitoringCredit {
                action: CreditAction::Continue,
                monitoring_key: self.monitoring_key.clone(),
                granted_units: Some(gsu.to_granted_units()),
                level: self.level.into(),
            },
        }
    }
}

/// Credit instructions for every usage monitor of a RAR, in order
pub fn usage_monitoring_credits(usage_monitors: &[UsageMonitoringInfo]) -> Vec<UsageMonitoringCredit> {
    usage_monitors
        .iter()
        .map(UsageMonitoringInfo::to_usage_monitoring_credit)
        .collect()
}

impl UsageReport {
    /// Transmitted bytes are input octets, received bytes are output octets
    pub fn from_usage_monitor_update(update: &UsageMonitorUpdate) -> Self {
        UsageReport {
            monitoring_key: update.monitoring_key.clone(),
            level: update.level.into(),
            input_octets: update.bytes_tx,
            output_octets: update.bytes_rx,
            total_octets: update.bytes_tx.saturating_add(update.bytes_rx),
        }
    }
}
