//! Resource-intent types.
//!
//! Each type here is a plain serializable value describing one resource the
//! stack wants to exist. Nothing in this module talks to a cloud API: the
//! intent tree is handed as-is to the external provisioning engine, which
//! performs synthesis, dependency resolution, and deployment.

use serde::{Deserialize, Serialize};

/// Subnet placement tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubnetKind {
    /// Routable from the public internet
    Public,
    /// No route to the public internet
    Isolated,
}

/// Subnet group specification, stamped once per availability zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetSpec {
    /// Subnet group name
    pub name: String,
    /// Placement tier
    pub kind: SubnetKind,
    /// Prefix length carved per subnet
    pub cidr_mask: u8,
}

/// VPC intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpcSpec {
    /// Logical id within the stack
    pub id: String,
    /// CIDR block, passed through unvalidated
    pub cidr: String,
    /// Maximum availability zones to span
    pub max_azs: u32,
    /// NAT gateway count (zero keeps the stack free-tier friendly)
    pub nat_gateways: u32,
    /// Subnet groups, one instance per AZ each
    pub subnets: Vec<SubnetSpec>,
}

/// The remote end an ingress rule admits traffic from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Peer {
    /// An IPv4 range in CIDR notation
    Cidr(String),
    /// Another security group in the stack, by logical id
    SecurityGroup(String),
}

/// A single ingress rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngressRule {
    /// Source of the admitted traffic
    pub peer: Peer,
    /// IP protocol
    pub protocol: String,
    /// First admitted port
    pub from_port: u16,
    /// Last admitted port
    pub to_port: u16,
    /// Human-readable rule description
    pub description: String,
}

impl IngressRule {
    /// A single-port TCP rule.
    pub fn tcp(peer: Peer, port: u16, description: impl Into<String>) -> Self {
        Self {
            peer,
            protocol: "tcp".to_string(),
            from_port: port,
            to_port: port,
            description: description.into(),
        }
    }
}

/// Security group intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityGroupSpec {
    /// Logical id within the stack
    pub id: String,
    /// Group description
    pub description: String,
    /// Whether all outbound traffic is permitted
    pub allow_all_outbound: bool,
    /// Ingress rules
    pub ingress: Vec<IngressRule>,
}

/// EC2 instance intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceSpec {
    /// Logical id within the stack
    pub id: String,
    /// Provider instance type name (`t3.micro`)
    pub instance_type: String,
    /// Machine image selector
    pub machine_image: String,
    /// Placement tier
    pub subnet: SubnetKind,
    /// Attached security group, by logical id
    pub security_group: String,
    /// Grant session-manager access (no inbound port required)
    pub session_manager: bool,
}

/// RDS database instance intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSpec {
    /// Logical id within the stack
    pub id: String,
    /// Database engine identifier
    pub engine: String,
    /// Engine major version
    pub engine_version: String,
    /// Provider instance type name (`db.t3.micro`)
    pub instance_type: String,
    /// Database name created at provision time
    pub database_name: String,
    /// Allocated storage in GB
    pub allocated_storage: u32,
    /// Storage ceiling; equal to `allocated_storage` disables auto-growth
    pub max_allocated_storage: u32,
    /// Placement tier
    pub subnet: SubnetKind,
    /// Attached security group, by logical id
    pub security_group: String,
    /// Credential handling
    pub credentials: Credentials,
    /// What happens to the instance when the stack is destroyed
    pub removal_policy: RemovalPolicy,
    /// Delete automated backups together with the instance
    pub delete_automated_backups: bool,
}

/// Database credential source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Credentials {
    /// Username with a password generated into a managed secret
    GeneratedSecret {
        /// Admin username
        username: String,
    },
}

/// Removal policy applied when the declaring stack is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalPolicy {
    /// Delete the resource with the stack
    Destroy,
    /// Keep the resource after the stack is gone
    Retain,
}

/// A named output binding exposed after deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpec {
    /// Output name
    pub name: String,
    /// Bound value
    pub value: OutputValue,
    /// Human-readable description
    pub description: String,
}

/// The value an output binds to, resolved at deployment time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputValue {
    /// An attribute of a declared resource, by logical id
    Attribute {
        /// Logical id of the resource
        resource: String,
        /// Attribute name on that resource
        attribute: String,
    },
}

impl OutputValue {
    /// Binds to an attribute of a declared resource.
    pub fn attribute(resource: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::Attribute {
            resource: resource.into(),
            attribute: attribute.into(),
        }
    }
}
