use sqlx::{query_builder::Separated, Postgres, QueryBuilder};

use crate::{
    entities::certification::{Certification, CertificationDraft, CertificationFilter},
    repositories::{
        memory::{MemoryDocument, SortValue},
        sqlx_repo::{escape_like, SqlDocument},
    },
};

impl SqlDocument for Certification {
    type Row = Certification;

    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "issuer",
        "date_obtained",
        "credential_id",
        "credential_url",
        "link",
        "expiry_date",
        "created_at",
        "updated_at",
    ];
    const TEXT_SORT_COLUMNS: &'static [&'static str] = &["name", "issuer"];
    const UNIQUE_CONSTRAINTS: &'static [(&'static str, &'static str)] =
        &[("certifications_credential_id_key", "credentialId")];

    fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &CertificationFilter) {
        if let Some(issuer) = &filter.issuer {
            builder
                .push(" AND issuer ILIKE ")
                .push_bind(format!("%{}%", escape_like(issuer)));
        }
    }

    fn bind_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values
            .push_bind(self.id)
            .push_bind(self.name.clone())
            .push_bind(self.issuer.clone())
            .push_bind(self.date_obtained)
            .push_bind(self.credential_id.clone())
            .push_bind(self.credential_url.clone())
            .push_bind(self.link.clone())
            .push_bind(self.expiry_date)
            .push_bind(self.created_at)
            .push_bind(self.updated_at);
    }

    fn bind_assignments(draft: &CertificationDraft, sets: &mut Separated<'_, '_, Postgres, &'static str>) {
        sets.push("name = ").push_bind_unseparated(draft.name.clone());
        sets.push("issuer = ").push_bind_unseparated(draft.issuer.clone());
        sets.push("date_obtained = ").push_bind_unseparated(draft.date_obtained);
        sets.push("credential_id = ").push_bind_unseparated(draft.credential_id.clone());
        sets.push("credential_url = ").push_bind_unseparated(draft.credential_url.clone());
        sets.push("link = ").push_bind_unseparated(draft.link.clone());
        sets.push("expiry_date = ").push_bind_unseparated(draft.expiry_date);
    }
}

impl MemoryDocument for Certification {
    fn matches(&self, filter: &CertificationFilter) -> bool {
        match &filter.issuer {
            Some(issuer) => self.issuer.to_lowercase().contains(&issuer.to_lowercase()),
            None => true,
        }
    }

    fn sort_value(&self, field: &str) -> SortValue {
        match field {
            "name" => SortValue::Text(self.name.clone()),
            "issuer" => SortValue::Text(self.issuer.clone()),
            "dateObtained" => self.date_obtained.into(),
            "expiryDate" => self.expiry_date.into(),
            "createdAt" => SortValue::Time(self.created_at),
            "updatedAt" => SortValue::Time(self.updated_at),
            _ => SortValue::Null,
        }
    }

    fn unique_keys(&self) -> Vec<(&'static str, String)> {
        match self.credential_id.as_deref() {
            Some(id) if !id.is_empty() => vec![("credentialId", id.to_string())],
            _ => Vec::new(),
        }
    }
}
