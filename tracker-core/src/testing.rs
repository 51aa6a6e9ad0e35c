//! Pipeline run fixtures shared by the unit tests

use std::cell::Cell;

use crate::domain::pipeline_run::{
    Condition, ConditionStatus, ObjectMeta, PipelineRun, PipelineRunStatus, ResourceBinding,
    ResourceSpec, ResourceType, SUCCEEDED_CONDITION,
};

pub const EXAMPLE_REPO_URL: &str = "https://example.com/test/repo.git";
pub const EXAMPLE_SHA: &str = "aa0a35a867ed2094da60042062e8f3d6000e3952";

/// Deterministic suffixes for binding names
#[derive(Debug, Default)]
pub struct NameSource {
    next: Cell<u32>,
}

impl NameSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self, prefix: &str) -> String {
        let n = self.next.get();
        self.next.set(n + 1);
        format!("{}-{:05}", prefix, n)
    }
}

pub fn make_pipeline_run(bindings: Vec<ResourceBinding>) -> PipelineRun {
    let mut run = PipelineRun {
        metadata: ObjectMeta {
            name: "test-pipeline-run-with-labels".to_string(),
            namespace: "foo".to_string(),
            ..Default::default()
        },
        ..Default::default()
    };
    run.metadata
        .labels
        .insert("label-key".to_string(), "label-value".to_string());
    run.spec.resources = bindings;
    run
}

pub fn make_git_resource_binding(names: &NameSource, url: &str, rev: &str) -> ResourceBinding {
    ResourceBinding {
        name: names.name("some-resource"),
        resource_spec: Some(
            ResourceSpec::new(ResourceType::Git)
                .with_param("url", url)
                .with_param("revision", rev),
        ),
    }
}

pub fn make_image_resource_binding(names: &NameSource, url: &str) -> ResourceBinding {
    ResourceBinding {
        name: names.name("some-resource"),
        resource_spec: Some(ResourceSpec::new(ResourceType::Image).with_param("url", url)),
    }
}

/// Resource spec with only the non-empty params set
pub fn make_pipeline_resource(resource_type: ResourceType, url: &str, rev: &str) -> ResourceSpec {
    let mut spec = ResourceSpec::new(resource_type);
    if !url.is_empty() {
        spec = spec.with_param("url", url);
    }
    if !rev.is_empty() {
        spec = spec.with_param("revision", rev);
    }
    spec
}

pub fn with_annotation(mut run: PipelineRun, key: &str, value: &str) -> PipelineRun {
    run.metadata
        .annotations
        .insert(key.to_string(), value.to_string());
    run
}

pub fn with_succeeded(mut run: PipelineRun, status: ConditionStatus) -> PipelineRun {
    run.status = Some(PipelineRunStatus {
        conditions: vec![Condition {
            condition_type: SUCCEEDED_CONDITION.to_string(),
            status,
            reason: None,
            message: None,
            last_transition_time: None,
        }],
    });
    run
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_source_default() {
        let names = NameSource::default();
        assert_eq!(names.name("run"), "run-00000");
        assert_eq!(names.name("run"), "run-00001");
        assert_eq!(NameSource::new().name("run"), "run-00000");
    }
}
