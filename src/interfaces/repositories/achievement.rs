use sqlx::{query_builder::Separated, Postgres, QueryBuilder};

use crate::{
    entities::achievement::{Achievement, AchievementDraft, AchievementFilter, AchievementRow},
    repositories::{
        memory::{MemoryDocument, SortValue},
        sqlx_repo::SqlDocument,
    },
};

impl SqlDocument for Achievement {
    type Row = AchievementRow;

    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "description",
        "date",
        "category",
        "image_url",
        "link",
        "created_at",
        "updated_at",
    ];
    const TEXT_SORT_COLUMNS: &'static [&'static str] = &["title", "category"];

    fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &AchievementFilter) {
        if let Some(category) = &filter.category {
            builder.push(" AND category = ").push_bind(category.clone());
        }
    }

    fn bind_values(&self, values: &mut Separated<'_, '_, Postgres, &'static str>) {
        values
            .push_bind(self.id)
            .push_bind(self.title.clone())
            .push_bind(self.description.clone())
            .push_bind(self.date)
            .push_bind(self.category.as_str())
            .push_bind(self.image_url.clone())
            .push_bind(self.link.clone())
            .push_bind(self.created_at)
            .push_bind(self.updated_at);
    }

    fn bind_assignments(draft: &AchievementDraft, sets: &mut Separated<'_, '_, Postgres, &'static str>) {
        sets.push("title = ").push_bind_unseparated(draft.title.clone());
        sets.push("description = ").push_bind_unseparated(draft.description.clone());
        sets.push("date = ").push_bind_unseparated(draft.date);
        sets.push("category = ").push_bind_unseparated(draft.category.as_str());
        sets.push("image_url = ").push_bind_unseparated(draft.image_url.clone());
        sets.push("link = ").push_bind_unseparated(draft.link.clone());
    }
}

impl MemoryDocument for Achievement {
    fn matches(&self, filter: &AchievementFilter) -> bool {
        filter
            .category
            .as_deref()
            .is_none_or(|category| self.category.as_str() == category)
    }

    fn sort_value(&self, field: &str) -> SortValue {
        match field {
            "title" => SortValue::Text(self.title.clone()),
            "date" => self.date.into(),
            "category" => SortValue::Text(self.category.as_str().to_string()),
            "createdAt" => SortValue::Time(self.created_at),
            "updatedAt" => SortValue::Time(self.updated_at),
            _ => SortValue::Null,
        }
    }
}
