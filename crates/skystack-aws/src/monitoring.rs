//! Monitoring manager
//!
//! Metric alarms and the dashboards that list them. Dashboards reference
//! alarms by physical name only; widget layout is left to deploy tooling.

use crate::error::{AwsError, Result};
use crate::PROVIDER;
use serde::{Deserialize, Serialize};
use serde_json::json;
use skystack_core::{stage_name, Resource, StackProps, Synth};

const ALARM: &str = "alarm";
const DASHBOARD: &str = "dashboard";
const DEFAULT_EVALUATION_PERIODS: u32 = 3;
const DEFAULT_PERIOD_SECS: u32 = 300;

/// Configuration entry for one metric alarm
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmProps {
    pub id: String,

    #[serde(default)]
    pub namespace: Option<String>,

    #[serde(default)]
    pub metric_name: Option<String>,

    #[serde(default)]
    pub threshold: Option<f64>,

    /// Comparison operator; defaults to greater-than-or-equal
    #[serde(default)]
    pub comparison: Option<String>,

    #[serde(default)]
    pub evaluation_periods: Option<u32>,

    #[serde(default)]
    pub period: Option<u32>,
}

/// Configuration entry for one dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardProps {
    pub id: String,

    /// Physical alarm names to surface on the dashboard
    #[serde(default)]
    pub alarms: Vec<String>,
}

/// Handle to a created alarm
#[derive(Debug, Clone)]
pub struct Alarm {
    pub scoped_id: String,
    pub alarm_name: String,
}

/// Handle to a created dashboard
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub scoped_id: String,
    pub dashboard_name: String,
}

/// Manager for alarms and dashboards
pub struct MonitoringManager {
    props: StackProps,
}

impl MonitoringManager {
    pub fn new(props: StackProps) -> Self {
        Self { props }
    }

    pub fn create_alarm(&self, id: &str, synth: &mut Synth, alarm: &AlarmProps) -> Result<Alarm> {
        let namespace = alarm.namespace.as_deref().ok_or_else(|| {
            AwsError::invalid_props(ALARM, id, "namespace is required")
        })?;
        let metric_name = alarm.metric_name.as_deref().ok_or_else(|| {
            AwsError::invalid_props(ALARM, id, "metricName is required")
        })?;
        let threshold = alarm.threshold.ok_or_else(|| {
            AwsError::invalid_props(ALARM, id, "threshold is required")
        })?;

        let alarm_name = stage_name(id, &self.props.stage);

        let resource = Resource::new(
            PROVIDER,
            ALARM,
            json!({
                "alarmName": alarm_name,
                "namespace": namespace,
                "metricName": metric_name,
                "threshold": threshold,
                "comparison": alarm.comparison.as_deref().unwrap_or("GreaterThanOrEqualToThreshold"),
                "evaluationPeriods": alarm.evaluation_periods.unwrap_or(DEFAULT_EVALUATION_PERIODS),
                "period": alarm.period.unwrap_or(DEFAULT_PERIOD_SECS),
                "region": self.props.region,
            }),
        );
        synth.add_resource(id, resource)?;
        synth.add_output(id, "alarmName", alarm_name.clone())?;

        tracing::info!(scoped_id = id, alarm = %alarm_name, "Created alarm");
        Ok(Alarm {
            scoped_id: id.to_string(),
            alarm_name,
        })
    }

    pub fn create_dashboard(
        &self,
        id: &str,
        synth: &mut Synth,
        dashboard: &DashboardProps,
    ) -> Result<Dashboard> {
        let dashboard_name = stage_name(id, &self.props.stage);

        let resource = Resource::new(
            PROVIDER,
            DASHBOARD,
            json!({
                "dashboardName": dashboard_name,
                "alarms": dashboard.alarms,
                "region": self.props.region,
            }),
        );
        synth.add_resource(id, resource)?;
        synth.add_output(id, "dashboardName", dashboard_name.clone())?;

        tracing::info!(scoped_id = id, dashboard = %dashboard_name, "Created dashboard");
        Ok(Dashboard {
            scoped_id: id.to_string(),
            dashboard_name,
        })
    }
}
