//! Technology descriptions shown by tech icons and showcase items

/// Description used for names missing from the table
pub const DEFAULT_DESCRIPTION: &str = "DevOps technology for modern infrastructure";

const TECH_INFO: &[(&str, &str)] = &[
    ("Docker", "Containerization platform for packaging applications with dependencies"),
    ("Kubernetes", "Container orchestration platform for automating deployment, scaling, and management"),
    ("AWS", "Amazon Web Services - Cloud computing platform with comprehensive services"),
    ("Azure", "Microsoft Azure - Primary cloud platform with 6+ years expertise"),
    ("Azure DevOps", "Microsoft DevOps platform for CI/CD, project management, and collaboration"),
    ("Jenkins", "Open-source automation server for continuous integration and deployment"),
    ("GitLab", "Complete DevOps platform for source code management and CI/CD pipelines"),
    ("Terraform", "Infrastructure as Code tool for building, changing, and versioning infrastructure"),
    ("Grafana", "Open-source analytics and monitoring platform with beautiful dashboards"),
    ("Git", "Distributed version control system for tracking changes in source code"),
    ("Python", "High-level programming language perfect for automation and scripting"),
    ("Linux", "Open-source operating system kernel, foundation of many server environments"),
    ("Ansible", "Automation tool for configuration management, application deployment, and orchestration"),
    ("Prometheus", "Open-source monitoring and alerting toolkit for reliability and observability"),
    ("Elasticsearch", "Distributed search and analytics engine for all types of data"),
    ("Node.js", "JavaScript runtime for building scalable server-side applications"),
    ("PowerShell", "Task automation and configuration management framework from Microsoft"),
    ("LinkerD", "Service mesh for Kubernetes providing observability, reliability, and security"),
    ("Velero", "Open source tool for backing up and restoring Kubernetes cluster resources"),
    ("Pluto", "Tool for detecting deprecated Kubernetes apiVersions in Helm charts and manifests"),
    ("SQL", "Structured Query Language for managing and manipulating relational databases"),
    ("MongoDB", "NoSQL document database for modern applications"),
    ("Power BI", "Business analytics tool for creating interactive visualizations and reports"),
];

/// Look up a technology. Names are matched exactly.
pub fn lookup(name: &str) -> Option<&'static str> {
    TECH_INFO
        .iter()
        .find(|(tech, _)| *tech == name)
        .map(|(_, description)| *description)
}

/// Description for `name`, falling back to [`DEFAULT_DESCRIPTION`]
pub fn describe(name: &str) -> &'static str {
    lookup(name).unwrap_or(DEFAULT_DESCRIPTION)
}

/// Notification text announcing a technology
pub fn announcement(name: &str) -> String {
    format!("🚀 {name}: {}", describe(name))
}

/// Every known technology name
pub fn names() -> impl Iterator<Item = &'static str> {
    TECH_INFO.iter().map(|(name, _)| *name)
}
