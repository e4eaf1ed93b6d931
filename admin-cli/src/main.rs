use std::fs;
use std::io;
use std::path::Path;
use std::process;

use admin_client::{
    AdminClient, AdminClientError, Content, ContentPage, ContentQuery, Page, SessionUser, Teacher,
    TeacherQuery,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

const TOKEN_FILE: &str = ".admin_token";
const DEFAULT_SERVER: &str = "http://127.0.0.1:8080";

#[derive(Debug, Parser)]
#[command(name = "admin-cli", version, about = "Client CLI de la console d'administration")]
struct Cli {
    /// Adresse du serveur (sinon `ADMIN_HTTP_URL`, sinon localhost).
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Ouvre une session administrateur et enregistre le jeton.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Demande un jeton à durée de vie étendue.
        #[arg(long)]
        remember: bool,
    },
    /// Affiche le profil de la session courante.
    Me,
    /// Liste les contenus.
    Contents {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
        /// Terme de recherche (titre et description).
        #[arg(long)]
        q: Option<String>,
        /// Filtre par type (`AUDIO`, `VIDEO`, `TEXT`, `PDF`, `EBOOK`).
        #[arg(long = "type")]
        content_type: Option<String>,
        /// Filtre par langue.
        #[arg(long)]
        lang: Option<String>,
        /// Filtre par statut (`DRAFT`, `PUBLISHED`, ...).
        #[arg(long)]
        status: Option<String>,
    },
    /// Affiche un contenu par id.
    Get {
        #[arg(long)]
        id: i64,
    },
    /// Supprime un contenu (requiert une session).
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Liste les enseignants.
    Teachers {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
        /// Terme de recherche (nom et biographie).
        #[arg(long)]
        q: Option<String>,
        /// Filtre par état de vérification.
        #[arg(long)]
        verified: Option<bool>,
    },
    /// Recherche transverse (contenus et enseignants).
    Search {
        #[arg(long)]
        q: String,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Ferme la session et oublie le jeton local.
    Logout,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Erreur: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let server = resolve_server(cli.server);
    let mut client = AdminClient::new(server);

    if let Some(token) = load_token().context("impossible de lire .admin_token")? {
        client.set_token(token);
    }

    match cli.command {
        Command::Login {
            email,
            password,
            remember,
        } => {
            let token = client
                .login(&email, &password, remember)
                .await
                .map_err(map_client_error)?;
            persist_token(&client).context("impossible d'enregistrer le jeton")?;
            println!("Session ouverte");
            println!("token: {token}");
        }
        Command::Me => {
            let session = client.me().await.map_err(map_client_error)?;
            print_session(&session);
        }
        Command::Contents {
            page,
            size,
            q,
            content_type,
            lang,
            status,
        } => {
            let listing = client
                .list_contents(&ContentQuery {
                    page: Some(page),
                    size: Some(size),
                    q,
                    content_type,
                    lang,
                    status,
                })
                .await
                .map_err(map_client_error)?;
            print_contents(&listing);
        }
        Command::Get { id } => {
            let content = client.get_content(id).await.map_err(map_client_error)?;
            print_content("Contenu", &content);
        }
        Command::Delete { id } => {
            client.delete_content(id).await.map_err(map_client_error)?;
            println!("Contenu supprimé: id={id}");
        }
        Command::Teachers {
            page,
            size,
            q,
            verified,
        } => {
            let listing = client
                .list_teachers(&TeacherQuery {
                    page: Some(page),
                    size: Some(size),
                    q,
                    verified,
                    lang: None,
                })
                .await
                .map_err(map_client_error)?;
            print_teachers(&listing);
        }
        Command::Search { q, limit } => {
            let results = client.search(&q, limit).await.map_err(map_client_error)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&results)
                    .context("impossible de formater les résultats")?
            );
        }
        Command::Logout => {
            client.logout().await.map_err(map_client_error)?;
            if Path::new(TOKEN_FILE).exists() {
                fs::remove_file(TOKEN_FILE).context("impossible de supprimer .admin_token")?;
            }
            println!("Session fermée");
        }
    }

    Ok(())
}

fn resolve_server(server: Option<String>) -> String {
    let raw = server
        .or_else(|| std::env::var("ADMIN_HTTP_URL").ok())
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());
    normalize_server(raw)
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn parse_token_content(raw: &str) -> Option<String> {
    let token = raw.trim().to_string();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

fn load_token() -> io::Result<Option<String>> {
    if !Path::new(TOKEN_FILE).exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(TOKEN_FILE)?;
    Ok(parse_token_content(&raw))
}

fn persist_token(client: &AdminClient) -> io::Result<()> {
    if let Some(token) = client.token() {
        fs::write(TOKEN_FILE, token)?;
    }
    Ok(())
}

fn map_client_error(err: AdminClientError) -> anyhow::Error {
    let message = match err {
        AdminClientError::Unauthorized => {
            "authentification requise: lancez `admin-cli login --email ... --password ...`"
                .to_string()
        }
        AdminClientError::NotFound => "ressource introuvable".to_string(),
        AdminClientError::InvalidRequest(message) => format!("requête invalide: {message}"),
        AdminClientError::Http(err) => format!("erreur HTTP: {err}"),
    };
    anyhow::anyhow!(message)
}

fn print_session(session: &SessionUser) {
    println!("Session active");
    println!("id: {}", session.id);
    println!("email: {}", session.email);
    println!("name: {}", session.name);
    println!("roles: {}", session.roles.join(", "));
    println!("lang: {}", session.lang);
    println!("status: {}", session.status);
}

fn print_content(title: &str, content: &Content) {
    println!("{title}");
    println!("id: {}", content.id);
    println!("title: {}", content.title);
    if let Some(description) = &content.description {
        println!("description: {description}");
    }
    println!("type: {}", content.content_type);
    println!("lang: {}", content.lang);
    println!("status: {}", content.status);
    println!("views: {}", content.views_count);
    println!("downloads: {}", content.downloads_count);
    if let Some(published_at) = content.published_at {
        println!("published_at: {published_at}");
    }
    println!("created_at: {}", content.created_at);
    println!("updated_at: {}", content.updated_at);
}

fn print_contents(listing: &ContentPage) {
    let pagination = &listing.pagination;
    println!(
        "Contenus: {} (page={}, size={}, total={})",
        listing.data.len(),
        pagination.page,
        pagination.size,
        pagination.total
    );
    for content in &listing.data {
        println!(
            "- [{}] {} ({}/{}, {})",
            content.id, content.title, content.content_type, content.lang, content.status
        );
    }
    if !listing.facets.types.is_empty() {
        let per_type: Vec<String> = listing
            .facets
            .types
            .iter()
            .map(|(content_type, count)| format!("{content_type}={count}"))
            .collect();
        println!("Par type: {}", per_type.join(", "));
    }
}

fn print_teachers(listing: &Page<Teacher>) {
    let pagination = &listing.pagination;
    println!(
        "Enseignants: {} (page={}, size={}, total={})",
        listing.data.len(),
        pagination.page,
        pagination.size,
        pagination.total
    );
    for teacher in &listing.data {
        let badge = if teacher.verified { ", vérifié" } else { "" };
        println!(
            "- [{}] {} ({}{badge})",
            teacher.id, teacher.display_name, teacher.status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_server_keeps_scheme() {
        let s = normalize_server("https://example.com:8080".to_string());
        assert_eq!(s, "https://example.com:8080");
    }

    #[test]
    fn normalize_server_adds_http_scheme() {
        let s = normalize_server("127.0.0.1:8080".to_string());
        assert_eq!(s, "http://127.0.0.1:8080");
    }

    #[test]
    fn resolve_server_prefers_the_flag() {
        let server = resolve_server(Some("localhost:9999".to_string()));
        assert_eq!(server, "http://localhost:9999");
    }

    #[test]
    fn parse_token_content_trims_whitespace() {
        let token = parse_token_content("  abc.def.ghi  ");
        assert_eq!(token.as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn parse_token_content_rejects_blank() {
        let token = parse_token_content("   ");
        assert!(token.is_none());
    }
}
