use std::collections::HashMap;
use std::sync::Arc;

use rolecast_domain::{CustomRole, RoleSummary};

use crate::test_fakes::{
    FakeChannelRoles, FakeDocumentStore, FakeIdentityDirectory, Harness, harness_with, viewer,
};

use super::RoleQueryService;

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

async fn service_with(
    custom_roles: Vec<(&str, &str, Vec<&str>)>,
    channel_tags: Vec<(&str, Vec<&str>)>,
) -> (RoleQueryService, Harness) {
    let directory = FakeIdentityDirectory::with_users(vec![
        viewer("u1", "alice"),
        viewer("u2", "bob"),
    ]);
    let harness = harness_with(FakeDocumentStore::default(), directory);

    for (role_id, role_name, members) in custom_roles {
        let viewers = members
            .into_iter()
            .map(|user_id| viewer(user_id, "member"))
            .collect();
        let Ok(role) = CustomRole::from_parts(role_id, role_name, viewers) else {
            panic!("test role '{role_id}' must be valid");
        };
        harness.service.save_custom_role(role).await;
    }

    let channel_roles = FakeChannelRoles {
        tags: channel_tags
            .into_iter()
            .map(|(user_id, tags)| (user_id.to_owned(), names(&tags)))
            .collect::<HashMap<_, _>>(),
        fail_lookups: false,
    };

    let service = RoleQueryService::new(
        harness.service.clone(),
        harness.directory.clone(),
        Arc::new(channel_roles),
    );
    (service, harness)
}

#[tokio::test]
async fn user_is_in_role_matches_mapped_platform_tag() {
    let (service, _) = service_with(Vec::new(), Vec::new()).await;

    assert!(
        service
            .user_is_in_role("u1", &names(&["moderator"]), &names(&["mod"]))
            .await
    );
    assert!(
        !service
            .user_is_in_role("u1", &names(&["moderator"]), &names(&["vip"]))
            .await
    );
    assert!(
        !service
            .user_is_in_role("u1", &names(&["founder"]), &names(&["mod"]))
            .await
    );
}

#[tokio::test]
async fn user_is_in_role_includes_custom_roles() {
    let (service, _) = service_with(vec![("r1", "Regulars", vec!["u1"])], Vec::new()).await;

    assert!(service.user_is_in_role("u1", &[], &names(&["r1"])).await);
    assert!(!service.user_is_in_role("u2", &[], &names(&["r1"])).await);
}

#[tokio::test]
async fn all_roles_lists_native_before_custom() {
    let (service, _) = service_with(
        vec![("r1", "Regulars", vec!["u1"])],
        vec![("u1", vec!["vip", "mod", "moderator", "founder"])],
    )
    .await;

    let roles = service.get_all_roles_for_viewer("u1").await;

    assert_eq!(
        roles.unwrap_or_default(),
        vec![
            RoleSummary::new("vip", "VIP"),
            RoleSummary::new("mod", "Moderator"),
            RoleSummary::new("r1", "Regulars"),
        ]
    );
}

#[tokio::test]
async fn has_roles_any_matches_one_held_role() {
    let (service, _) = service_with(
        vec![("r1", "mod", vec!["u1"]), ("r2", "vip", vec!["u2"])],
        Vec::new(),
    )
    .await;

    assert!(service.has_roles("alice", "any", &names(&["mod", "vip"])).await);
    assert!(service.has_roles("bob", "ANY", &names(&["mod", "vip"])).await);
    assert!(!service.has_roles("alice", "any", &names(&["vip"])).await);
}

#[tokio::test]
async fn has_roles_all_requires_every_role() {
    let (service, _) = service_with(
        vec![
            ("r1", "mod", vec!["u1"]),
            ("r2", "vip", vec!["u1", "u2"]),
        ],
        Vec::new(),
    )
    .await;

    assert!(service.has_roles("alice", "all", &names(&["mod", "vip"])).await);
    assert!(!service.has_roles("bob", "all", &names(&["mod", "vip"])).await);
}

#[tokio::test]
async fn has_roles_combines_native_and_custom_names() {
    let (service, _) = service_with(
        vec![("r1", "Regulars", vec!["u1"])],
        vec![("u1", vec!["moderator"])],
    )
    .await;

    assert!(
        service
            .has_roles("alice", "all", &names(&["Moderator", "Regulars"]))
            .await
    );
}

#[tokio::test]
async fn has_roles_all_counts_repeated_requests() {
    let (service, _) = service_with(vec![("r1", "vip", vec!["u1"])], Vec::new()).await;

    assert!(!service.has_roles("alice", "all", &names(&["vip", "vip"])).await);
    assert!(service.has_roles("alice", "any", &names(&["vip", "vip"])).await);
}

#[tokio::test]
async fn has_roles_rejects_invalid_arguments() {
    let (service, _) = service_with(vec![("r1", "vip", vec!["u1"])], Vec::new()).await;

    assert!(!service.has_roles("", "any", &names(&["vip"])).await);
    assert!(!service.has_roles("alice", "", &names(&["vip"])).await);
    assert!(!service.has_roles("alice", "any", &[]).await);
    assert!(!service.has_roles("alice", "most", &names(&["vip"])).await);
    assert!(!service.has_roles("nobody", "any", &names(&["vip"])).await);
}

#[tokio::test]
async fn has_roles_is_false_when_channel_lookup_fails() {
    let (_, harness) = service_with(vec![("r1", "vip", vec!["u1"])], Vec::new()).await;
    let service = RoleQueryService::new(
        harness.service.clone(),
        harness.directory.clone(),
        Arc::new(FakeChannelRoles {
            tags: HashMap::new(),
            fail_lookups: true,
        }),
    );

    assert!(!service.has_roles("alice", "any", &names(&["vip"])).await);
}
