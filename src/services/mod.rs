pub(crate) mod ai_client;
pub(crate) mod ai_flows;
pub(crate) mod content;
pub(crate) mod dashboards;
pub(crate) mod grading;
pub(crate) mod materials;
pub(crate) mod quiz;
