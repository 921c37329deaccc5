//! Repository tests against a real Postgres. Skipped unless `TEST_DATABASE_URL`
//! is set, e.g. `TEST_DATABASE_URL=postgres://localhost/grimoire_test`.

use grimoire_api::models::{
    Desire, DesirePatch, Dream, DreamPatch, NewDesire, NewDream, NewRitualReminder, NewSpell,
    RitualReminder, RitualReminderPatch, Spell, SpellPatch,
};
use grimoire_api::{ensure_database_exists, ensure_schema, HealthCheck, PgStore, Repository};

async fn store() -> Option<PgStore> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    ensure_database_exists(&url).await.unwrap();
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .unwrap();
    ensure_schema(&pool).await.unwrap();
    Some(PgStore::new(pool))
}

fn new_spell(name: &str, tags: Option<Vec<String>>) -> NewSpell {
    NewSpell {
        name: name.to_string(),
        tags,
        kind: "proteção".into(),
        moon_phase_recommendation: None,
        ingredients: "sal, vela branca".into(),
        steps: "...".into(),
        notes: None,
    }
}

#[tokio::test]
async fn spell_round_trip_and_merge() {
    let Some(store) = store().await else { return };
    store.ping().await.unwrap();

    let tags = vec!["b".to_string(), "a".to_string(), "b".to_string()];
    let created = Repository::<Spell>::create(&store, new_spell("Proteção", Some(tags.clone())))
        .await
        .unwrap();
    assert_eq!(created.tags, tags);
    let fetched = Repository::<Spell>::get_by_id(&store, created.id).await.unwrap();
    assert_eq!(fetched.as_ref(), Some(&created));

    let unchanged = Repository::<Spell>::update(&store, created.id, SpellPatch::default())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged, created);

    let patch = SpellPatch {
        notes: Some("funcionou".into()),
        name: Some(String::new()),
        ..Default::default()
    };
    let updated = Repository::<Spell>::update(&store, created.id, patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.notes.as_deref(), Some("funcionou"));
    assert_eq!(updated.name, "");
    assert_eq!(updated.tags, created.tags);
    assert_eq!(updated.created_at, created.created_at);

    assert!(Repository::<Spell>::delete_by_id(&store, created.id).await.unwrap());
    assert!(Repository::<Spell>::get_by_id(&store, created.id).await.unwrap().is_none());
    assert!(!Repository::<Spell>::delete_by_id(&store, created.id).await.unwrap());
    assert!(Repository::<Spell>::update(&store, created.id, SpellPatch::default())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn spell_without_tags_stores_empty_array() {
    let Some(store) = store().await else { return };
    let created = Repository::<Spell>::create(&store, new_spell("Sem tags", None))
        .await
        .unwrap();
    assert!(created.tags.is_empty());
    Repository::<Spell>::delete_by_id(&store, created.id).await.unwrap();
}

#[tokio::test]
async fn dreams_order_by_date_then_created_at() {
    let Some(store) = store().await else { return };
    let day = |s: &str| Some(s.parse::<chrono::DateTime<chrono::Utc>>().unwrap());
    let mut ids = Vec::new();
    for (date, title) in [
        ("2001-01-01T00:00:00Z", "a"),
        ("2001-01-03T00:00:00Z", "b"),
        ("2001-01-01T00:00:00Z", "c"),
    ] {
        let dream = Repository::<Dream>::create(
            &store,
            NewDream {
                date: day(date),
                title: Some(title.into()),
                content: "...".into(),
                tags: None,
                feeling_on_wake: None,
            },
        )
        .await
        .unwrap();
        ids.push(dream.id);
    }
    let listed: Vec<i64> = Repository::<Dream>::list_all(&store)
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.id)
        .filter(|id| ids.contains(id))
        .collect();
    assert_eq!(listed, vec![ids[1], ids[2], ids[0]]);

    let patched = Repository::<Dream>::update(
        &store,
        ids[0],
        DreamPatch {
            tags: Some(vec!["voo".into()]),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(patched.tags, vec!["voo"]);
    assert_eq!(patched.title.as_deref(), Some("a"));

    for id in ids {
        Repository::<Dream>::delete_by_id(&store, id).await.unwrap();
    }
}

#[tokio::test]
async fn desire_defaults_status() {
    let Some(store) = store().await else { return };
    let desire = Repository::<Desire>::create(
        &store,
        NewDesire {
            title: "Jardim de ervas".into(),
            category: None,
            status: None,
            notes: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(desire.status, "open");
    let updated = Repository::<Desire>::update(
        &store,
        desire.id,
        DesirePatch {
            status: Some("realizado".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.status, "realizado");
    assert_eq!(updated.title, "Jardim de ervas");
    Repository::<Desire>::delete_by_id(&store, desire.id).await.unwrap();
}

#[tokio::test]
async fn desires_list_newest_first() {
    let Some(store) = store().await else { return };
    let mut ids = Vec::new();
    for title in ["Casa", "Viagem", "Horta"] {
        let desire = Repository::<Desire>::create(
            &store,
            NewDesire {
                title: title.into(),
                category: None,
                status: None,
                notes: None,
            },
        )
        .await
        .unwrap();
        ids.push(desire.id);
    }
    let listed: Vec<i64> = Repository::<Desire>::list_all(&store)
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.id)
        .filter(|id| ids.contains(id))
        .collect();
    assert_eq!(listed, vec![ids[2], ids[1], ids[0]]);

    for id in ids {
        Repository::<Desire>::delete_by_id(&store, id).await.unwrap();
    }
}

#[tokio::test]
async fn ritual_enabled_flag_and_order() {
    let Some(store) = store().await else { return };
    let mut ids = Vec::new();
    for (hour, minute) in [(23, 59), (0, 0)] {
        let ritual = Repository::<RitualReminder>::create(
            &store,
            NewRitualReminder {
                kind: "custom".into(),
                custom_label: Some("teste".into()),
                hour,
                minute,
                enabled: None,
            },
        )
        .await
        .unwrap();
        assert!(ritual.enabled);
        ids.push(ritual.id);
    }
    let listed: Vec<i64> = Repository::<RitualReminder>::list_all(&store)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .filter(|id| ids.contains(id))
        .collect();
    assert_eq!(listed, vec![ids[1], ids[0]]);

    let disabled = Repository::<RitualReminder>::update(
        &store,
        ids[0],
        RitualReminderPatch {
            enabled: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert!(!disabled.enabled);
    assert_eq!((disabled.hour, disabled.minute), (23, 59));

    for id in ids {
        Repository::<RitualReminder>::delete_by_id(&store, id).await.unwrap();
    }
}
