use std::path::Path;

use serde::Serialize;

use lexadmin::forms::CatalogForm;
use lexadmin::listing::{ListQuery, filter_keys};
use lexadmin::model::{Category, Page, Section, Vocabulary, VocabularyType, Word};
use lexadmin::remote::RemoteClient;

use crate::cli_commands::catalog::{FieldArgs, ListArgs};

use super::*;

pub(super) fn handle_catalog_command(
    ctx: &CliContext,
    resource: Resource,
    command: CatalogCommands,
) -> Result<()> {
    match command {
        CatalogCommands::List(args) => handle_list(ctx, resource, args),
        CatalogCommands::Get { id, json } => handle_get(ctx, resource, &id, json),
        CatalogCommands::Create(fields) => {
            let form = CatalogForm::create(resource);
            handle_submit(ctx, form, fields)
        }
        CatalogCommands::Update { id, fields } => {
            let form = CatalogForm::update(resource, id);
            handle_submit(ctx, form, fields)
        }
        CatalogCommands::Delete { id, yes } => handle_delete(ctx, resource, &id, yes),
    }
}

pub(super) fn handle_upload_command(ctx: &CliContext, path: &Path, json: bool) -> Result<()> {
    let client = ctx.require_session()?;
    let stored = api(ctx, client.upload_file(path))?;
    if json {
        println!("{}", serde_json::json!({ "file_path": stored }));
    } else {
        println!("{}", stored);
    }
    Ok(())
}

fn list_query(ctx: &CliContext, resource: Resource, args: &ListArgs) -> Result<ListQuery> {
    let mut query = ListQuery::new(resource, args.limit.unwrap_or(ctx.config.page_limit));
    query.page = args.page.max(1);
    query.search = args.search.clone().unwrap_or_default().trim().to_string();

    let given = [
        ("type", args.vocab_type.as_deref()),
        ("vocabulary", args.vocabulary.as_deref()),
        ("section", args.section.as_deref()),
        ("category", args.category.as_deref()),
    ];
    let accepted = filter_keys(resource);
    for (key, value) in given {
        let Some(value) = value else {
            continue;
        };
        if !accepted.contains(&key) {
            anyhow::bail!("`--{}` is not a filter for {} lists", key, resource);
        }
        if key == "type" && !value.trim().is_empty() {
            let ty: VocabularyType = value.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            query.set_filter(key, ty.as_str());
            continue;
        }
        query.set_filter(key, value);
    }
    Ok(query)
}

fn handle_list(ctx: &CliContext, resource: Resource, args: ListArgs) -> Result<()> {
    let query = list_query(ctx, resource, &args)?;
    let params = query.params();
    let client = ctx.client()?;
    match resource {
        Resource::Vocabulary => print_page(
            api(ctx, client.list_vocabularies(&params))?,
            args.json,
            |v| format!("{}  {}  {}", v.id, v.name, v.vocab_type),
        ),
        Resource::Section => print_page(api(ctx, client.list_sections(&params))?, args.json, |s| {
            format!("{}  {}  [{}]", s.id, s.name, s.vocabulary.name)
        }),
        Resource::Category => {
            print_page(api(ctx, client.list_categories(&params))?, args.json, |c| {
                format!("{}  {}  [{}]", c.id, c.name, c.section.name)
            })
        }
        Resource::Word => print_page(api(ctx, client.list_words(&params))?, args.json, |w| {
            let category = w.category.as_ref().map(|c| c.name.as_str()).unwrap_or("-");
            format!(
                "{}  {}  [{} / {} / {}]",
                w.id, w.name, w.vocabulary.name, w.section.name, category
            )
        }),
    }
}

fn print_page<T: Serialize>(page: Page<T>, json: bool, line: impl Fn(&T) -> String) -> Result<()> {
    if json {
        return print_json(
            &serde_json::json!({
                "data": page.items,
                "pagination": page.pagination,
            }),
            "list",
        );
    }
    if page.items.is_empty() {
        println!("No results found");
    }
    for item in &page.items {
        println!("{}", line(item));
    }
    println!("{}", page.pagination.describe());
    Ok(())
}

fn handle_get(ctx: &CliContext, resource: Resource, id: &str, json: bool) -> Result<()> {
    let client = ctx.require_session()?;
    match resource {
        Resource::Vocabulary => {
            let v: Vocabulary = api(ctx, client.get_one(resource, id))?;
            if json {
                return print_json(&v, "vocabulary");
            }
            println!("id: {}", v.id);
            println!("name: {}", v.name);
            println!("type: {}", v.vocab_type);
            println!("description: {}", v.description);
            println!("image: {}", v.image.unwrap_or_default());
        }
        Resource::Section => {
            let s: Section = api(ctx, client.get_one(resource, id))?;
            if json {
                return print_json(&s, "section");
            }
            println!("id: {}", s.id);
            println!("name: {}", s.name);
            println!("vocabulary: {} ({})", s.vocabulary.name, s.vocabulary.id);
            println!("image: {}", s.image.unwrap_or_default());
        }
        Resource::Category => {
            let c: Category = api(ctx, client.get_one(resource, id))?;
            if json {
                return print_json(&c, "category");
            }
            println!("id: {}", c.id);
            println!("name: {}", c.name);
            println!("vocabulary: {} ({})", c.vocabulary.name, c.vocabulary.id);
            println!("section: {} ({})", c.section.name, c.section.id);
        }
        Resource::Word => {
            let w: Word = api(ctx, client.get_one(resource, id))?;
            if json {
                return print_json(&w, "word");
            }
            println!("id: {}", w.id);
            println!("name: {}", w.name);
            println!("description: {}", w.description);
            println!("vocabulary: {} ({})", w.vocabulary.name, w.vocabulary.id);
            println!("section: {} ({})", w.section.name, w.section.id);
            match w.category {
                Some(c) => println!("category: {} ({})", c.name, c.id),
                None => println!("category: -"),
            }
            println!("image: {}", w.image.unwrap_or_default());
        }
    }
    Ok(())
}

fn apply_fields(form: &mut CatalogForm, fields: &FieldArgs) -> Result<()> {
    let given = [
        ("name", fields.name.as_deref()),
        ("type", fields.vocab_type.as_deref()),
        ("description", fields.description.as_deref()),
        ("vocabulary", fields.vocabulary.as_deref()),
        ("section", fields.section.as_deref()),
        ("category", fields.category.as_deref()),
        ("image", fields.image.as_deref()),
    ];
    for (key, value) in given {
        let Some(value) = value else {
            continue;
        };
        if !form.has_field(key) {
            anyhow::bail!("`--{}` does not apply to {}", key, form.title().to_lowercase());
        }
        form.set(key, value);
    }
    Ok(())
}

fn handle_submit(ctx: &CliContext, mut form: CatalogForm, fields: FieldArgs) -> Result<()> {
    apply_fields(&mut form, &fields)?;
    let client: RemoteClient = ctx.require_session()?;

    if let Some(path) = fields.upload.as_deref() {
        if !form.has_field("image") {
            anyhow::bail!("`--upload` does not apply to {}", form.title().to_lowercase());
        }
        // Validate with the local path standing in, so a bad form uploads nothing.
        form.set("image", path.display().to_string());
        form.validate()?;
        let stored = api(ctx, client.upload_file(path))?;
        form.set("image", stored);
    }

    let ack = api(ctx, form.submit(&client))?;
    println!("{}", ack.message);
    Ok(())
}

fn handle_delete(ctx: &CliContext, resource: Resource, id: &str, yes: bool) -> Result<()> {
    let client = ctx.require_session()?;
    if !yes && !confirm(&format!("Delete {} {}?", resource, id))? {
        println!("Aborted");
        return Ok(());
    }
    let ack = api(ctx, client.delete(resource, id))?;
    println!("{}", ack.message);
    Ok(())
}
