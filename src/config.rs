//! Stack configuration and the parameter resolver.
//!
//! [`StackConfig`] is the single immutable record every declaration consumes.
//! It is produced once per invocation by [`StackConfig::resolve`], a pure
//! function over the [`Context`] with a deliberate best-effort contract:
//! it never fails. Out-of-range numbers clamp to their floor, unknown enum
//! names fall back to the documented default, and blank strings take the
//! default literal. Structural validation (CIDR syntax, reachable AZ counts)
//! is the provisioning engine's job, not this layer's.

use crate::context::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Minimum allocated database storage in GB.
pub const MIN_ALLOCATED_STORAGE: u32 = 20;

/// Minimum availability zones when a database subnet group is declared.
pub const MIN_AZS_WITH_DATABASE: u32 = 2;

/// EC2/RDS instance class, restricted to a fixed supported set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InstanceClass {
    /// Previous-generation burstable
    T2,
    /// Burstable, lowest-cost tier (the default)
    #[default]
    T3,
    /// Burstable, AMD variant
    T3a,
    /// General purpose
    M5,
    /// General purpose, current generation
    M6i,
    /// Compute optimized
    C5,
    /// Compute optimized, current generation
    C6i,
    /// Memory optimized
    R5,
    /// Memory optimized, current generation
    R6i,
}

impl InstanceClass {
    /// Resolves a raw class name, case-insensitively, falling back to the
    /// default class when the name is not in the supported set.
    pub fn from_str_or_default(raw: &str) -> Self {
        match raw.to_uppercase().as_str() {
            "T2" => Self::T2,
            "T3" => Self::T3,
            "T3A" => Self::T3a,
            "M5" => Self::M5,
            "M6I" => Self::M6i,
            "C5" => Self::C5,
            "C6I" => Self::C6i,
            "R5" => Self::R5,
            "R6I" => Self::R6i,
            other => {
                debug!(class = other, "unknown instance class, using default");
                Self::default()
            }
        }
    }
}

impl fmt::Display for InstanceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::T2 => "t2",
            Self::T3 => "t3",
            Self::T3a => "t3a",
            Self::M5 => "m5",
            Self::M6i => "m6i",
            Self::C5 => "c5",
            Self::C6i => "c6i",
            Self::R5 => "r5",
            Self::R6i => "r6i",
        };
        write!(f, "{}", s)
    }
}

/// EC2/RDS instance size, restricted to a fixed supported set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InstanceSize {
    /// Smallest tier (the default)
    #[default]
    Micro,
    /// Small
    Small,
    /// Medium
    Medium,
    /// Large
    Large,
    /// Extra large
    Xlarge,
    /// 2x extra large
    Xlarge2,
    /// 4x extra large
    Xlarge4,
}

impl InstanceSize {
    /// Resolves a raw size name, case-insensitively, falling back to the
    /// default size when the name is not in the supported set.
    pub fn from_str_or_default(raw: &str) -> Self {
        match raw.to_uppercase().as_str() {
            "MICRO" => Self::Micro,
            "SMALL" => Self::Small,
            "MEDIUM" => Self::Medium,
            "LARGE" => Self::Large,
            "XLARGE" => Self::Xlarge,
            "XLARGE2" => Self::Xlarge2,
            "XLARGE4" => Self::Xlarge4,
            other => {
                debug!(size = other, "unknown instance size, using default");
                Self::default()
            }
        }
    }
}

impl fmt::Display for InstanceSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Micro => "micro",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Xlarge => "xlarge",
            Self::Xlarge2 => "2xlarge",
            Self::Xlarge4 => "4xlarge",
        };
        write!(f, "{}", s)
    }
}

/// A class/size pair, rendered as the provider type name (`t3.micro`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceType {
    /// Instance class
    pub class: InstanceClass,
    /// Instance size
    pub size: InstanceSize,
}

impl InstanceType {
    /// Builds an instance type from a class and a size.
    pub fn of(class: InstanceClass, size: InstanceSize) -> Self {
        Self { class, size }
    }

    /// Renders the database flavor of the type name (`db.t3.micro`).
    pub fn database_type_name(&self) -> String {
        format!("db.{}", self)
    }
}

impl fmt::Display for InstanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.class, self.size)
    }
}

/// Immutable, fully-resolved stack configuration.
///
/// Constructed once by [`StackConfig::resolve`] and never mutated after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackConfig {
    /// Stack name
    pub stack_name: String,
    /// Target region
    pub region: String,
    /// Target account, if pinned
    pub account: Option<String>,
    /// Compute instance type
    pub ec2_instance_type: InstanceType,
    /// Database instance type
    pub rds_instance_type: InstanceType,
    /// Database name to create
    pub database_name: String,
    /// Allocated database storage in GB (floor 20)
    pub allocated_storage: u32,
    /// VPC CIDR block, passed through unvalidated
    pub vpc_cidr: String,
    /// Maximum availability zones
    pub max_azs: u32,
    /// SSH source range; None means fully open for SSH variants
    pub ssh_cidr: Option<String>,
}

impl StackConfig {
    /// Resolves a configuration from raw context parameters.
    ///
    /// Pure and infallible: every invalid input degrades to a documented
    /// default or floor. `with_database` selects the availability-zone
    /// floor, since a database subnet group needs at least two zones.
    pub fn resolve(ctx: &Context, with_database: bool) -> Self {
        let az_floor = if with_database {
            MIN_AZS_WITH_DATABASE
        } else {
            1
        };

        Self {
            stack_name: string_or(ctx, "stackName", "ministack"),
            region: string_or(ctx, "region", "eu-west-2"),
            account: ctx.get("account").map(str::to_string),
            ec2_instance_type: InstanceType::of(
                class_param(ctx, "ec2InstanceClass"),
                size_param(ctx, "ec2InstanceSize"),
            ),
            rds_instance_type: InstanceType::of(
                class_param(ctx, "rdsInstanceClass"),
                size_param(ctx, "rdsInstanceSize"),
            ),
            database_name: string_or(ctx, "databaseName", "appdb"),
            allocated_storage: clamped_u32(
                ctx,
                "allocatedStorage",
                MIN_ALLOCATED_STORAGE,
                MIN_ALLOCATED_STORAGE,
            ),
            vpc_cidr: string_or(ctx, "vpcCidr", "10.0.0.0/16"),
            max_azs: clamped_u32(ctx, "maxAzs", MIN_AZS_WITH_DATABASE, az_floor),
            ssh_cidr: ctx.get("sshCidr").map(str::to_string),
        }
    }
}

fn string_or(ctx: &Context, key: &str, default: &str) -> String {
    ctx.get(key).unwrap_or(default).to_string()
}

fn class_param(ctx: &Context, key: &str) -> InstanceClass {
    ctx.get(key)
        .map(InstanceClass::from_str_or_default)
        .unwrap_or_default()
}

fn size_param(ctx: &Context, key: &str) -> InstanceSize {
    ctx.get(key)
        .map(InstanceSize::from_str_or_default)
        .unwrap_or_default()
}

/// Parses a base-10 integer parameter. Absent input takes the default;
/// non-numeric or below-floor input clamps to the floor.
fn clamped_u32(ctx: &Context, key: &str, default: u32, floor: u32) -> u32 {
    let Some(raw) = ctx.get(key) else {
        return default;
    };
    match raw.trim().parse::<i64>() {
        Ok(n) if n >= i64::from(floor) => u32::try_from(n).unwrap_or(u32::MAX),
        Ok(n) => {
            debug!(key, value = n, floor, "value below floor, clamping");
            floor
        }
        Err(_) => {
            debug!(key, value = raw, floor, "non-numeric value, clamping");
            floor
        }
    }
}
