//! Notification topic manager

use crate::error::Result;
use crate::PROVIDER;
use serde::{Deserialize, Serialize};
use serde_json::json;
use skystack_core::{stage_name, Resource, StackProps, Synth};

const RESOURCE: &str = "topic";

/// Configuration entry for one topic
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicProps {
    pub id: String,

    #[serde(default)]
    pub display_name: Option<String>,

    /// FIFO topics get the `.fifo` suffix on their physical name
    #[serde(default)]
    pub fifo: bool,
}

/// Handle to a created topic
#[derive(Debug, Clone)]
pub struct Topic {
    pub scoped_id: String,
    pub topic_name: String,
    pub topic_arn: String,
}

/// Manager for notification topics
pub struct TopicManager {
    props: StackProps,
}

impl TopicManager {
    pub fn new(props: StackProps) -> Self {
        Self { props }
    }

    pub fn create(&self, id: &str, synth: &mut Synth, topic: &TopicProps) -> Result<Topic> {
        let mut topic_name = stage_name(id, &self.props.stage);
        if topic.fifo {
            topic_name.push_str(".fifo");
        }

        let resource = Resource::new(
            PROVIDER,
            RESOURCE,
            json!({
                "topicName": topic_name,
                "displayName": topic.display_name.as_deref().unwrap_or(id),
                "fifo": topic.fifo,
                "region": self.props.region,
            }),
        );
        synth.add_resource(id, resource)?;

        let arn = Synth::attr_ref(id, "topicArn");
        synth.add_output(id, "topicName", topic_name.clone())?;
        synth.add_output(id, "topicArn", arn.clone())?;

        tracing::info!(scoped_id = id, topic = %topic_name, "Created topic");
        Ok(Topic {
            scoped_id: id.to_string(),
            topic_name,
            topic_arn: arn,
        })
    }
}
