//! End-to-end flattening of a realistic multi-tenant document: record
//! contents, emission order, filter deduplication across contracts, and the
//! rendered diagnostics of a failing document.

use acifab_core::model::{FilterRecord, VrfRecord};
use acifab_core::{validate_and_flatten, FlatModel};

const DOCUMENT: &str = "
tenants:
  - name: prod
    description: production workloads
    vrfs:
      - name: core
      - name: dmz
    contracts:
      - name: web-to-app
        scope: application-profile
        subject:
          - name: http
            filter: allow-http
      - name: app-to-db
        scope: context
        subject:
          - name: sql
            filter: allow-sql
          - name: health
            filter: allow-http
    bridge_domains:
      - name: web-bd
        vrf: dmz
        subnets:
          - name: 192.168.10.1
            mask: 24
            scope: public
      - name: app-bd
        vrf: core
        subnets:
          - name: 10.10.0.1
            mask: 24
            scope: private
          - name: 10.10.1.1
            mask: 24
            scope: shared
    application_profiles:
      - name: shop
        description: customer-facing storefront
        epgs:
          - name: web
            bd: web-bd
            contracts:
              - name: web-to-app
                type: consumer
          - name: app
            bd: app-bd
            contracts:
              - name: web-to-app
                type: provider
              - name: app-to-db
                type: consumer
          - name: db
            bd: app-bd
            contracts:
              - name: app-to-db
                type: provider
  - name: lab
    description: scratch environment
    vrfs:
      - name: core
    contracts:
      - name: any-to-any
        scope: tenant
        subject:
          - name: all
            filter: allow-any
    bridge_domains:
      - name: lab-bd
        vrf: core
        subnets:
          - name: 172.16.0.1
            mask: 16
            scope: private
    application_profiles:
      - name: sandbox
        description: throwaway experiments
        epgs:
          - name: scratch
            bd: lab-bd
            contracts:
              - name: any-to-any
                type: consumer
              - name: any-to-any
                type: provider
";

fn flatten(source: &str) -> Result<FlatModel, acifab_core::FlattenError> {
    validate_and_flatten(&serde_yaml::from_str(source).unwrap())
}

#[test]
fn document_flattens_with_expected_cardinalities() {
    let model = flatten(DOCUMENT).unwrap();
    assert_eq!(model.tenants.len(), 2);
    assert_eq!(model.vrfs.len(), 3);
    assert_eq!(model.contracts.len(), 3);
    assert_eq!(model.contract_subjects.len(), 4);
    assert_eq!(model.contract_subject_to_filters.len(), 4);
    // allow-http referenced by two subjects in prod: deduplicated.
    assert_eq!(model.filters.len(), 3);
    assert_eq!(model.bridge_domains.len(), 3);
    assert_eq!(model.bridge_domain_subnets.len(), 4);
    assert_eq!(model.application_profiles.len(), 2);
    assert_eq!(model.endpoint_groups.len(), 4);
    assert_eq!(model.endpoint_group_contracts.len(), 6);
    assert_eq!(model.record_count(), 38);
}

#[test]
fn vrfs_emit_in_traversal_order() {
    let model = flatten(DOCUMENT).unwrap();
    assert_eq!(
        model.vrfs,
        [
            VrfRecord {
                tenant: "prod".to_string(),
                vrf: "core".to_string(),
            },
            VrfRecord {
                tenant: "prod".to_string(),
                vrf: "dmz".to_string(),
            },
            VrfRecord {
                tenant: "lab".to_string(),
                vrf: "core".to_string(),
            },
        ]
    );
}

#[test]
fn filters_record_first_reference_only() {
    let model = flatten(DOCUMENT).unwrap();
    assert_eq!(
        model.filters,
        [
            FilterRecord {
                tenant: "prod".to_string(),
                filter: "allow-http".to_string(),
            },
            FilterRecord {
                tenant: "prod".to_string(),
                filter: "allow-sql".to_string(),
            },
            FilterRecord {
                tenant: "lab".to_string(),
                filter: "allow-any".to_string(),
            },
        ]
    );
}

#[test]
fn epg_may_bind_same_contract_in_both_roles() {
    let model = flatten(DOCUMENT).unwrap();
    let scratch: Vec<_> = model
        .endpoint_group_contracts
        .iter()
        .filter(|record| record.epg == "scratch")
        .collect();
    assert_eq!(scratch.len(), 2);
    assert_eq!(scratch[0].contract, "any-to-any");
    assert_eq!(scratch[1].contract, "any-to-any");
    assert_ne!(scratch[0].role, scratch[1].role);
}

#[test]
fn serialized_output_is_stable_across_runs() {
    let first = serde_yaml::to_string(&flatten(DOCUMENT).unwrap()).unwrap();
    let second = serde_yaml::to_string(&flatten(DOCUMENT).unwrap()).unwrap();
    assert_eq!(first, second);
    assert!(first.starts_with("application_profiles:"));
}

#[test]
fn failing_document_renders_breadcrumb_diagnostic() {
    let source = DOCUMENT.replace("        vrf: dmz\n", "        vrf: edge\n");
    let err = flatten(&source).unwrap_err();
    assert_eq!(
        err.to_string(),
        "vrf \"edge\" not declared in vrfs: prod -> web-bd"
    );
}

#[test]
fn tenant_isolation_holds_for_identical_names() {
    // Both tenants declare a vrf named `core`; each resolves only its own.
    let model = flatten(DOCUMENT).unwrap();
    let lab_bds: Vec<_> = model
        .bridge_domains
        .iter()
        .filter(|record| record.tenant == "lab")
        .collect();
    assert_eq!(lab_bds.len(), 1);
    assert_eq!(lab_bds[0].vrf, "core");
}
