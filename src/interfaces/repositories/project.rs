use sqlx::{query_builder::Separated, Postgres, QueryBuilder};

use crate::{
    entities::project::{Project, ProjectDraft, ProjectFilter},
    repositories::{
        memory::{MemoryDocument, SortValue},
        sqlx_repo::SqlDocument,
    },
};

impl SqlDocument for Project {
    type Row = Project;

    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "description",
        "technologies",
        "link",
        "image_url",
        "start_date",
        "end_date",
        "featured",
        "created_at",
        "updated_at",
    ];
    const TEXT_SORT_COLUMNS: &'static [&'static str] = &["title"];

    fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &ProjectFilter) {
        if filter.featured_only {
            builder.push(" AND featured = TRUE");
        }
    }

    fn bind_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values
            .push_bind(self.id)
            .push_bind(self.title.clone())
            .push_bind(self.description.clone())
            .push_bind(self.technologies.clone())
            .push_bind(self.link.clone())
            .push_bind(self.image_url.clone())
            .push_bind(self.start_date)
            .push_bind(self.end_date)
            .push_bind(self.featured)
            .push_bind(self.created_at)
            .push_bind(self.updated_at);
    }

    fn bind_assignments(draft: &ProjectDraft, sets: &mut Separated<'_, '_, Postgres, &'static str>) {
        sets.push("title = ").push_bind_unseparated(draft.title.clone());
        sets.push("description = ").push_bind_unseparated(draft.description.clone());
        sets.push("technologies = ").push_bind_unseparated(draft.technologies.clone());
        sets.push("link = ").push_bind_unseparated(draft.link.clone());
        sets.push("image_url = ").push_bind_unseparated(draft.image_url.clone());
        sets.push("start_date = ").push_bind_unseparated(draft.start_date);
        sets.push("end_date = ").push_bind_unseparated(draft.end_date);
        sets.push("featured = ").push_bind_unseparated(draft.featured);
    }
}

impl MemoryDocument for Project {
    fn matches(&self, filter: &ProjectFilter) -> bool {
        !filter.featured_only || self.featured
    }

    fn sort_value(&self, field: &str) -> SortValue {
        match field {
            "title" => SortValue::Text(self.title.clone()),
            "featured" => SortValue::Bool(self.featured),
            "startDate" => self.start_date.into(),
            "endDate" => self.end_date.into(),
            "createdAt" => SortValue::Time(self.created_at),
            "updatedAt" => SortValue::Time(self.updated_at),
            _ => SortValue::Null,
        }
    }
}
