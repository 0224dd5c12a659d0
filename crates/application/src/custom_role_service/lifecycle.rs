use super::*;

impl CustomRoleService {
    /// Migrates legacy roles, loads stored roles into memory and refreshes
    /// cached viewer identities.
    ///
    /// A store read failure leaves the in-memory map untouched, which at
    /// startup means no custom roles.
    pub async fn load_custom_roles(&self) -> LoadSummary {
        let migration = self.migrate_legacy_custom_roles().await;

        debug!("loading custom roles");
        let (loaded_roles, skipped_entries) = match self.store.get_data("/").await {
            Ok(Some(document)) => self.replace_roles_from_document(document).await,
            Ok(None) => (0, 0),
            Err(error) => {
                warn!(error = %error, "failed to read custom roles document");
                return LoadSummary {
                    migration,
                    loaded_roles: 0,
                    skipped_entries: 0,
                    refresh: RefreshSummary::default(),
                };
            }
        };
        debug!(loaded_roles, skipped_entries, "loaded custom roles");

        let refresh = self.refresh_custom_roles_user_data().await;

        LoadSummary {
            migration,
            loaded_roles,
            skipped_entries,
            refresh,
        }
    }

    /// Upgrades the username-only role format, then deletes the legacy
    /// document.
    ///
    /// The first failure aborts the run and keeps the legacy document so the
    /// next startup retries. Roles migrated before the failure stay saved.
    pub async fn migrate_legacy_custom_roles(&self) -> LegacyMigrationOutcome {
        let Some(legacy_store) = self.legacy_store.as_ref() else {
            return LegacyMigrationOutcome::NotPresent;
        };

        let document = match legacy_store.get_data("/").await {
            Ok(Some(document)) => document,
            Ok(None) => return LegacyMigrationOutcome::NotPresent,
            Err(error) => return migration_failed(error.to_string()),
        };

        info!("legacy custom roles document detected, starting migration");

        let legacy_roles: IndexMap<String, LegacyCustomRole> =
            match serde_json::from_value(document) {
                Ok(legacy_roles) => legacy_roles,
                Err(error) => {
                    return migration_failed(format!("unreadable legacy document: {error}"));
                }
            };

        let mut migrated = 0_usize;
        for legacy_role in legacy_roles.into_values() {
            info!(role_name = %legacy_role.name, "migrating custom role");

            let resolved = if legacy_role.viewers.is_empty() {
                Vec::new()
            } else {
                match self
                    .identity_lookup
                    .get_users_by_names(legacy_role.viewers.as_slice())
                    .await
                {
                    Ok(resolved) => resolved,
                    Err(error) => return migration_failed(error.to_string()),
                }
            };

            let role = match legacy_role.into_custom_role(resolved) {
                Ok(role) => role,
                Err(error) => return migration_failed(error.to_string()),
            };
            let role_name = role.name().to_owned();

            if let RoleMutationOutcome::PersistenceFailed(reason) =
                self.save_custom_role(role).await
            {
                return migration_failed(reason);
            }
            migrated += 1;
            info!(role_name = %role_name, "finished migrating custom role");
        }

        info!("deleting legacy custom roles document");
        if let Err(error) = legacy_store.delete("/").await {
            return migration_failed(error.to_string());
        }

        info!(roles = migrated, "legacy custom role migration complete");
        LegacyMigrationOutcome::Migrated { roles: migrated }
    }

    /// Re-reads every member from the identity directory and overwrites the
    /// cached username and display name. Membership never changes; members
    /// the directory no longer knows keep their last snapshot.
    pub async fn refresh_custom_roles_user_data(&self) -> RefreshSummary {
        debug!("refreshing custom role user data");

        let snapshot: Vec<(String, Vec<String>)> = self
            .roles
            .read()
            .await
            .values()
            .map(|role| (role.id().to_owned(), role.viewer_ids()))
            .collect();

        let mut summary = RefreshSummary::default();
        for (role_id, viewer_ids) in snapshot {
            summary.roles_visited += 1;

            let identities = if viewer_ids.is_empty() {
                Vec::new()
            } else {
                match self
                    .identity_lookup
                    .get_users_by_ids(viewer_ids.as_slice())
                    .await
                {
                    Ok(identities) => identities,
                    Err(error) => {
                        warn!(
                            role_id = %role_id,
                            error = %error,
                            "failed to refresh custom role viewers"
                        );
                        summary.lookup_failures += 1;
                        continue;
                    }
                }
            };

            let updated_role = {
                let mut roles = self.roles.write().await;
                let Some(role) = roles.get_mut(&role_id) else {
                    continue;
                };

                for identity in &identities {
                    if role.refresh_viewer(identity) {
                        summary.viewers_updated += 1;
                    }
                }
                role.clone()
            };

            self.persist_role(&updated_role).await;
            debug!(role_id = %role_id, "custom role updated");
        }

        summary
    }

    async fn replace_roles_from_document(&self, document: serde_json::Value) -> (usize, usize) {
        let serde_json::Value::Object(entries) = document else {
            warn!("custom roles document root is not an object");
            return (0, 1);
        };

        let mut loaded = IndexMap::with_capacity(entries.len());
        let mut skipped = 0_usize;
        for (key, value) in entries {
            match serde_json::from_value::<CustomRole>(value) {
                Ok(role) => {
                    loaded.insert(role.id().to_owned(), role);
                }
                Err(error) => {
                    skipped += 1;
                    warn!(entry = %key, error = %error, "skipping unreadable custom role");
                }
            }
        }

        let count = loaded.len();
        *self.roles.write().await = loaded;
        (count, skipped)
    }
}

fn migration_failed(reason: String) -> LegacyMigrationOutcome {
    error!(error = %reason, "unexpected error during custom role migration");
    LegacyMigrationOutcome::Failed(reason)
}
