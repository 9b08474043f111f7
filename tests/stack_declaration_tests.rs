//! Integration tests for the topology declaration.
//!
//! Mirrors the assertions the deployed template was held to: subnet layout,
//! no NAT gateways, security rule scoping, database wiring, and the named
//! output bindings.

use ministack::config::StackConfig;
use ministack::context::Context;
use ministack::stack::resources::{OutputValue, Peer, RemovalPolicy, SubnetKind};
use ministack::stack::{Stack, StackVariant};
use pretty_assertions::assert_eq;

fn declare(pairs: &[(&str, &str)], variant: StackVariant) -> Stack {
    let ctx = Context::from_iter(pairs.iter().copied());
    let config = StackConfig::resolve(&ctx, variant.has_database());
    Stack::declare(&config, variant)
}

#[test]
fn vpc_has_one_public_and_one_isolated_subnet_group() {
    let stack = declare(&[], StackVariant::FullSessionManager);
    assert_eq!(stack.vpc.subnets.len(), 2);
    assert_eq!(stack.vpc.subnets[0].kind, SubnetKind::Public);
    assert_eq!(stack.vpc.subnets[1].kind, SubnetKind::Isolated);
    assert!(stack.vpc.subnets.iter().all(|s| s.cidr_mask == 24));
}

#[test]
fn no_nat_gateways_are_declared() {
    for variant in [
        StackVariant::ComputeSsh,
        StackVariant::FullSsh,
        StackVariant::FullSessionManager,
    ] {
        assert_eq!(declare(&[], variant).vpc.nat_gateways, 0);
    }
}

#[test]
fn vpc_uses_configured_cidr_and_azs() {
    let stack = declare(
        &[("vpcCidr", "172.31.0.0/16"), ("maxAzs", "3")],
        StackVariant::FullSsh,
    );
    assert_eq!(stack.vpc.cidr, "172.31.0.0/16");
    assert_eq!(stack.vpc.max_azs, 3);
}

#[test]
fn instance_is_in_the_public_subnet_with_default_type() {
    let stack = declare(&[], StackVariant::FullSessionManager);
    assert_eq!(stack.instance.subnet, SubnetKind::Public);
    assert_eq!(stack.instance.instance_type, "t3.micro");
    assert_eq!(stack.instance.security_group, "Ec2SecurityGroup");
}

#[test]
fn ssh_variant_scopes_ingress_to_configured_cidr() {
    let stack = declare(&[("sshCidr", "10.0.0.0/8")], StackVariant::ComputeSsh);
    let ec2_sg = &stack.security_groups[0];
    assert_eq!(ec2_sg.ingress.len(), 1);
    let rule = &ec2_sg.ingress[0];
    assert_eq!(rule.peer, Peer::Cidr("10.0.0.0/8".to_string()));
    assert_eq!((rule.from_port, rule.to_port), (22, 22));
    assert_eq!(rule.protocol, "tcp");
}

#[test]
fn ssh_ingress_defaults_to_fully_open() {
    let stack = declare(&[], StackVariant::ComputeSsh);
    let rule = &stack.security_groups[0].ingress[0];
    assert_eq!(rule.peer, Peer::Cidr("0.0.0.0/0".to_string()));
}

#[test]
fn session_manager_variant_opens_no_inbound_ports() {
    let stack = declare(&[], StackVariant::FullSessionManager);
    assert!(stack.security_groups[0].ingress.is_empty());
    assert!(stack.instance.session_manager);
}

#[test]
fn ssh_variants_do_not_grant_session_manager() {
    assert!(!declare(&[], StackVariant::ComputeSsh).instance.session_manager);
    assert!(!declare(&[], StackVariant::FullSsh).instance.session_manager);
}

#[test]
fn database_security_group_admits_only_the_instance_group() {
    for variant in [StackVariant::FullSsh, StackVariant::FullSessionManager] {
        let stack = declare(&[], variant);
        let rds_sg = stack
            .security_groups
            .iter()
            .find(|sg| sg.id == "RdsSecurityGroup")
            .expect("database variant declares an RDS security group");
        assert!(!rds_sg.allow_all_outbound);
        assert_eq!(rds_sg.ingress.len(), 1);
        let rule = &rds_sg.ingress[0];
        // Never a CIDR peer on the database port
        assert_eq!(rule.peer, Peer::SecurityGroup("Ec2SecurityGroup".to_string()));
        assert_eq!((rule.from_port, rule.to_port), (5432, 5432));
    }
}

#[test]
fn compute_variant_declares_no_database() {
    let stack = declare(&[], StackVariant::ComputeSsh);
    assert!(stack.database.is_none());
    assert_eq!(stack.security_groups.len(), 1);
}

#[test]
fn database_is_isolated_with_growth_disabled() {
    let stack = declare(&[("allocatedStorage", "100")], StackVariant::FullSsh);
    let db = stack.database.expect("full variant declares a database");
    assert_eq!(db.subnet, SubnetKind::Isolated);
    assert_eq!(db.engine, "postgres");
    assert_eq!(db.engine_version, "16");
    assert_eq!(db.allocated_storage, 100);
    assert_eq!(db.max_allocated_storage, 100);
    assert_eq!(db.removal_policy, RemovalPolicy::Destroy);
    assert!(db.delete_automated_backups);
}

#[test]
fn database_type_uses_db_prefix() {
    let stack = declare(
        &[("rdsInstanceClass", "R5"), ("rdsInstanceSize", "LARGE")],
        StackVariant::FullSessionManager,
    );
    let db = stack.database.unwrap();
    assert_eq!(db.instance_type, "db.r5.large");
}

#[test]
fn instance_outputs_are_always_bound() {
    let stack = declare(&[], StackVariant::ComputeSsh);
    let names: Vec<&str> = stack.outputs.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, ["InstancePublicIp", "InstanceId"]);
    assert_eq!(
        stack.outputs[0].value,
        OutputValue::attribute("Instance", "public_ip")
    );
}

#[test]
fn database_outputs_are_bound_when_declared() {
    let stack = declare(&[], StackVariant::FullSessionManager);
    let names: Vec<&str> = stack.outputs.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(
        names,
        ["InstancePublicIp", "InstanceId", "RdsEndpoint", "RdsSecretArn"]
    );
    assert_eq!(
        stack.outputs[3].value,
        OutputValue::attribute("Database", "secret_arn")
    );
}

#[test]
fn stack_carries_name_and_environment() {
    let stack = declare(
        &[
            ("stackName", "staging"),
            ("region", "eu-central-1"),
            ("account", "999999999999"),
        ],
        StackVariant::FullSsh,
    );
    assert_eq!(stack.name, "staging");
    assert_eq!(stack.environment.region, "eu-central-1");
    assert_eq!(stack.environment.account.as_deref(), Some("999999999999"));
}

#[test]
fn declared_tree_serializes_to_json() {
    let stack = declare(&[("sshCidr", "192.168.0.0/16")], StackVariant::FullSsh);
    let doc = serde_json::to_value(&stack).unwrap();
    assert_eq!(doc["vpc"]["nat_gateways"], 0);
    assert_eq!(
        doc["security_groups"][0]["ingress"][0]["peer"]["cidr"],
        "192.168.0.0/16"
    );
    assert_eq!(doc["database"]["credentials"]["generated_secret"]["username"], "postgres");
}
