//! Resource topology declaration.
//!
//! [`Stack::declare`] maps a resolved [`StackConfig`] and a [`StackVariant`]
//! onto a fixed tree of resource intents. It is a pure function with no
//! failure path: it validates nothing and calls nothing. Synthesis-time
//! problems (malformed CIDR, unreachable AZ counts) surface in the external
//! provisioning engine that consumes the tree.

pub mod resources;

use crate::config::StackConfig;
use clap::ValueEnum;
use resources::{
    Credentials, DatabaseSpec, IngressRule, InstanceSpec, OutputSpec, OutputValue, Peer,
    RemovalPolicy, SecurityGroupSpec, SubnetKind, SubnetSpec, VpcSpec,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// PostgreSQL's standard port.
const POSTGRES_PORT: u16 = 5432;

/// SSH source range used when none is configured.
const OPEN_SSH_CIDR: &str = "0.0.0.0/0";

/// The stack flavors this repo ships. They differ only in the instance
/// access model and whether a database is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StackVariant {
    /// EC2 only, SSH ingress from the configured source range
    ComputeSsh,
    /// EC2 plus PostgreSQL, SSH ingress
    FullSsh,
    /// EC2 plus PostgreSQL, session-manager access with no inbound rule
    #[default]
    FullSessionManager,
}

impl StackVariant {
    /// Whether this variant declares a database.
    pub fn has_database(self) -> bool {
        matches!(self, Self::FullSsh | Self::FullSessionManager)
    }

    /// Whether this variant opens an SSH ingress rule.
    pub fn has_ssh_ingress(self) -> bool {
        matches!(self, Self::ComputeSsh | Self::FullSsh)
    }
}

impl fmt::Display for StackVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ComputeSsh => "compute-ssh",
            Self::FullSsh => "full-ssh",
            Self::FullSessionManager => "full-session-manager",
        };
        write!(f, "{}", s)
    }
}

/// Deployment environment the stack targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Target region
    pub region: String,
    /// Target account; None defers to the deploying credentials
    pub account: Option<String>,
}

/// A declared stack: one named, deployable tree of resource intents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    /// Stack name
    pub name: String,
    /// Variant this tree was declared from
    pub variant: StackVariant,
    /// Target environment
    pub environment: Environment,
    /// Network container
    pub vpc: VpcSpec,
    /// Security groups, in declaration order
    pub security_groups: Vec<SecurityGroupSpec>,
    /// The compute instance
    pub instance: InstanceSpec,
    /// The database instance, when the variant declares one
    pub database: Option<DatabaseSpec>,
    /// Named output bindings
    pub outputs: Vec<OutputSpec>,
}

impl Stack {
    /// Declares the full resource topology for a configuration and variant.
    pub fn declare(config: &StackConfig, variant: StackVariant) -> Self {
        let vpc = VpcSpec {
            id: "Vpc".to_string(),
            cidr: config.vpc_cidr.clone(),
            max_azs: config.max_azs,
            nat_gateways: 0,
            subnets: vec![
                SubnetSpec {
                    name: "Public".to_string(),
                    kind: SubnetKind::Public,
                    cidr_mask: 24,
                },
                SubnetSpec {
                    name: "Private".to_string(),
                    kind: SubnetKind::Isolated,
                    cidr_mask: 24,
                },
            ],
        };

        let mut ec2_ingress = Vec::new();
        if variant.has_ssh_ingress() {
            let source = config.ssh_cidr.as_deref().unwrap_or(OPEN_SSH_CIDR);
            ec2_ingress.push(IngressRule::tcp(
                Peer::Cidr(source.to_string()),
                22,
                "Allow SSH access",
            ));
        }
        let ec2_security_group = SecurityGroupSpec {
            id: "Ec2SecurityGroup".to_string(),
            description: "Security group for EC2 instance".to_string(),
            allow_all_outbound: true,
            ingress: ec2_ingress,
        };

        let instance = InstanceSpec {
            id: "Instance".to_string(),
            instance_type: config.ec2_instance_type.to_string(),
            machine_image: "amazon-linux-2023".to_string(),
            subnet: SubnetKind::Public,
            security_group: ec2_security_group.id.clone(),
            session_manager: !variant.has_ssh_ingress(),
        };

        let mut security_groups = vec![ec2_security_group];
        let mut outputs = vec![
            OutputSpec {
                name: "InstancePublicIp".to_string(),
                value: OutputValue::attribute(&instance.id, "public_ip"),
                description: "Public IP address of the EC2 instance".to_string(),
            },
            OutputSpec {
                name: "InstanceId".to_string(),
                value: OutputValue::attribute(&instance.id, "instance_id"),
                description: "Instance ID of the EC2 instance".to_string(),
            },
        ];

        let database = variant.has_database().then(|| {
            let rds_security_group = SecurityGroupSpec {
                id: "RdsSecurityGroup".to_string(),
                description: "Security group for RDS instance - only accessible from EC2"
                    .to_string(),
                allow_all_outbound: false,
                ingress: vec![IngressRule::tcp(
                    Peer::SecurityGroup("Ec2SecurityGroup".to_string()),
                    POSTGRES_PORT,
                    "Allow PostgreSQL access from EC2 instance only",
                )],
            };
            let database = DatabaseSpec {
                id: "Database".to_string(),
                engine: "postgres".to_string(),
                engine_version: "16".to_string(),
                instance_type: config.rds_instance_type.database_type_name(),
                database_name: config.database_name.clone(),
                allocated_storage: config.allocated_storage,
                // Ceiling equals the allocation, so storage never auto-grows
                max_allocated_storage: config.allocated_storage,
                subnet: SubnetKind::Isolated,
                security_group: rds_security_group.id.clone(),
                credentials: Credentials::GeneratedSecret {
                    username: "postgres".to_string(),
                },
                removal_policy: RemovalPolicy::Destroy,
                delete_automated_backups: true,
            };

            security_groups.push(rds_security_group);
            outputs.push(OutputSpec {
                name: "RdsEndpoint".to_string(),
                value: OutputValue::attribute(&database.id, "endpoint_address"),
                description: "RDS database endpoint address".to_string(),
            });
            outputs.push(OutputSpec {
                name: "RdsSecretArn".to_string(),
                value: OutputValue::attribute(&database.id, "secret_arn"),
                description: "ARN of the secret containing RDS credentials".to_string(),
            });
            database
        });

        Self {
            name: config.stack_name.clone(),
            variant,
            environment: Environment {
                region: config.region.clone(),
                account: config.account.clone(),
            },
            vpc,
            security_groups,
            instance,
            database,
            outputs,
        }
    }
}
