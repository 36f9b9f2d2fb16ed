//! The `menu` subcommand: list and edit one business's menu.

use std::io::Write as _;

use anyhow::{bail, Context as _};
use clap::{Args, Subcommand};

use tablepin_client::PinStoreClient;
use tablepin_core::{MenuEntry, MenuKind, Role, SessionContext};
use tablepin_menu::{InsertPosition, ItemDraft, MenuEditor, RecoveryPolicy};

#[derive(Debug, Args)]
pub struct MenuArgs {
    /// Business (pin) id whose menu to operate on.
    #[arg(long)]
    pub business: String,

    /// Which menu: food or drinks.
    #[arg(long, value_enum, default_value_t = MenuKindArg::Food)]
    pub kind: MenuKindArg,

    /// Acting user id, matched against the business creator for edits.
    #[arg(long)]
    pub user: Option<String>,

    /// Act with the elevated role.
    #[arg(long)]
    pub admin: bool,

    /// Keep optimistic local edits when a persist fails, instead of
    /// rolling back.
    #[arg(long)]
    pub keep_local: bool,

    #[command(subcommand)]
    pub action: MenuAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum MenuKindArg {
    Food,
    Drinks,
}

impl From<MenuKindArg> for MenuKind {
    fn from(value: MenuKindArg) -> Self {
        match value {
            MenuKindArg::Food => MenuKind::Food,
            MenuKindArg::Drinks => MenuKind::Drinks,
        }
    }
}

#[derive(Debug, Args)]
pub struct PositionArgs {
    /// Insert at this exact index.
    #[arg(long, conflicts_with_all = ["above", "below"])]
    pub at: Option<usize>,

    /// Insert above (before) the entry at this index.
    #[arg(long, conflicts_with = "below")]
    pub above: Option<usize>,

    /// Insert below (after) the entry at this index.
    #[arg(long)]
    pub below: Option<usize>,
}

impl PositionArgs {
    fn resolve(&self) -> InsertPosition {
        if let Some(i) = self.above {
            InsertPosition::Above(i)
        } else if let Some(i) = self.below {
            InsertPosition::Below(i)
        } else if let Some(i) = self.at {
            InsertPosition::At(i)
        } else {
            InsertPosition::Append
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum MenuAction {
    /// Print the menu in display order.
    List,
    /// Insert a new line item.
    AddItem {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        description: Option<String>,
        #[command(flatten)]
        position: PositionArgs,
    },
    /// Insert a new section header.
    AddHeader {
        #[arg(long)]
        title: String,
        #[command(flatten)]
        position: PositionArgs,
    },
    /// Replace the fields of the item at an index.
    EditItem {
        #[arg(long)]
        index: usize,
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Replace the title of the header at an index.
    EditHeader {
        #[arg(long)]
        index: usize,
        #[arg(long)]
        title: String,
    },
    /// Remove the entry at an index (asks for confirmation).
    Delete {
        #[arg(long)]
        index: usize,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

pub async fn run(client: &PinStoreClient, args: MenuArgs) -> anyhow::Result<()> {
    let kind: MenuKind = args.kind.into();
    let record = client
        .get_pin(&args.business)
        .await
        .with_context(|| format!("could not load business '{}'", args.business))?;

    if let MenuAction::List = args.action {
        print!("{}", render_menu(record.menu(kind)));
        return Ok(());
    }

    // Mutations are gated before the editor is even constructed: creator
    // or admin only. Reads above are unrestricted.
    let role = if args.admin { Role::Admin } else { Role::User };
    let session = match &args.user {
        Some(user) => SessionContext::signed_in(user.clone(), role),
        None if args.admin => SessionContext {
            user_id: None,
            role,
            location: None,
        },
        None => SessionContext::anonymous(),
    };
    if !session.can_edit_menu(&record) {
        bail!(
            "user {:?} may not edit this menu (creator: {:?})",
            session.user_id,
            record.creator
        );
    }

    let recovery = if args.keep_local {
        RecoveryPolicy::KeepLocal
    } else {
        RecoveryPolicy::Rollback
    };
    let mut editor = MenuEditor::from_record(client, &record, kind).with_recovery(recovery);

    match args.action {
        MenuAction::List => unreachable!("handled above"),
        MenuAction::AddItem {
            name,
            price,
            description,
            position,
        } => {
            editor
                .insert_item(
                    ItemDraft {
                        name,
                        price,
                        description,
                    },
                    position.resolve(),
                )
                .await?;
        }
        MenuAction::AddHeader { title, position } => {
            editor.insert_header(title, position.resolve()).await?;
        }
        MenuAction::EditItem {
            index,
            name,
            price,
            description,
        } => {
            editor
                .edit_item(
                    index,
                    ItemDraft {
                        name,
                        price,
                        description,
                    },
                )
                .await?;
        }
        MenuAction::EditHeader { index, title } => {
            editor.edit_header(index, title).await?;
        }
        MenuAction::Delete { index, yes } => {
            if !yes && !confirm_delete(editor.entries(), index)? {
                println!("aborted");
                return Ok(());
            }
            editor.delete_entry(index).await?;
        }
    }

    print!("{}", render_menu(editor.entries()));
    Ok(())
}

fn confirm_delete(entries: &[MenuEntry], index: usize) -> anyhow::Result<bool> {
    let label = entries
        .get(index)
        .map_or_else(|| format!("entry {index}"), entry_label);
    print!("delete {label}? [y/N] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y"))
}

fn entry_label(entry: &MenuEntry) -> String {
    match entry {
        MenuEntry::Header { title, .. } => format!("header '{title}'"),
        MenuEntry::Item { name, .. } => format!("item '{name}'"),
    }
}

/// Renders the menu with indices, headers flush left, items indented.
pub fn render_menu(entries: &[MenuEntry]) -> String {
    if entries.is_empty() {
        return "(empty menu)\n".to_string();
    }

    let mut out = String::new();
    for (index, entry) in entries.iter().enumerate() {
        match entry {
            MenuEntry::Header { title, .. } => {
                out.push_str(&format!("{index}: == {title} ==\n"));
            }
            MenuEntry::Item {
                name,
                price,
                description,
                ..
            } => {
                out.push_str(&format!("{index}:   {name} {price}"));
                if let Some(description) = description {
                    out.push_str(&format!(" ({description})"));
                }
                out.push('\n');
            }
        }
    }
    out
}
