//! GDML Editor.
//!
//! Kommandozeilen-Frontend für den Editor-Kern: Volumenbaum anzeigen,
//! Volumen einfügen/löschen/umbenennen, Materialien zuweisen und den
//! Benutzer-Materialkatalog pflegen.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gdml_editor::core::{LengthUnit, Shape, VolumeView};
use gdml_editor::materials::UserMaterialRecord;
use gdml_editor::{AppController, AppIntent, AppState, EditorOptions, InsertVolumeRequest};
use glam::DVec3;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "gdml-editor", version, about = "Editor für GDML-Geometrien")]
struct Cli {
    /// Abweichende Optionen-Datei (Standard: gdml_editor.toml neben der Binary)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Volumenbaum (oder gefilterte Liste) ausgeben
    Tree {
        file: String,
        /// Case-insensitiver Teilstring; schaltet auf flache Liste um
        #[arg(long)]
        filter: Option<String>,
    },
    /// Alle wählbaren Materialnamen ausgeben
    Materials { file: Option<String> },
    /// Material eines Volumens setzen
    SetMaterial {
        file: String,
        volume: String,
        material: String,
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Volumen umbenennen
    Rename {
        file: String,
        old_name: String,
        new_name: String,
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Volumen samt Platzierungen löschen
    Delete {
        file: String,
        volume: String,
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Quader-Volumen einfügen
    InsertBox {
        file: String,
        name: String,
        #[arg(long, default_value = "World")]
        parent: String,
        #[arg(long)]
        material: String,
        /// Kantenlängen X Y Z
        #[arg(long, required = true, num_args = 3, value_names = ["X", "Y", "Z"])]
        size: Vec<f64>,
        /// Längeneinheit (mm, cm, m); Standard aus den Optionen
        #[arg(long)]
        unit: Option<String>,
        /// Position X Y Z in `unit`
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
        at: Option<Vec<f64>>,
        /// Rotation X Y Z in Grad
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
        rotate: Option<Vec<f64>>,
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Benutzermaterial aus einer JSON-Datei definieren
    DefineMaterial {
        name: String,
        record: PathBuf,
        /// Unlesbare Katalogdatei ersetzen
        #[arg(long)]
        replace_broken_catalog: bool,
    },
    /// Benutzermaterial aus dem Katalog entfernen
    RemoveMaterial {
        name: String,
        /// Unlesbare Katalogdatei ersetzen
        #[arg(long)]
        replace_broken_catalog: bool,
    },
    /// Neue Geometrie (World-Würfel aus Luft) anlegen
    New { output: String },
}

fn main() -> Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    log::debug!("GDML Editor v{} startet...", env!("CARGO_PKG_VERSION"));

    let config_path = cli.config.clone().unwrap_or_else(EditorOptions::config_path);
    let options = EditorOptions::load_from_file(&config_path);
    let mut runner = CliRunner::new(options, config_path);
    runner.run(cli.command)
}

/// Führt CLI-Befehle über den Intent/Command-Fluss aus.
struct CliRunner {
    state: AppState,
    controller: AppController,
}

impl CliRunner {
    fn new(options: EditorOptions, config_path: PathBuf) -> Self {
        Self {
            state: AppState::from_options(options).with_config_path(config_path),
            controller: AppController::new(),
        }
    }

    fn intent(&mut self, intent: AppIntent) -> Result<()> {
        self.controller.handle_intent(&mut self.state, intent)
    }

    fn open(&mut self, file: &str) -> Result<()> {
        self.intent(AppIntent::FileSelected {
            path: file.to_string(),
        })
    }

    /// Speichert nach `output` oder zurück in die geöffnete Datei.
    fn save(&mut self, output: Option<String>) -> Result<()> {
        match output {
            Some(path) => self.intent(AppIntent::SaveFilePathSelected { path }),
            None => self.intent(AppIntent::SaveRequested),
        }?;
        if let Some(path) = self.state.ui.current_file_path.as_deref() {
            println!("Gespeichert: {}", path);
        }
        Ok(())
    }

    fn edit(&mut self, file: &str, intent: AppIntent, output: Option<String>) -> Result<()> {
        self.open(file)?;
        self.intent(intent)?;
        if let Some(message) = self.state.ui.status_message.as_deref() {
            println!("{}", message);
        }
        self.save(output)
    }

    fn run(&mut self, command: CliCommand) -> Result<()> {
        match command {
            CliCommand::Tree { file, filter } => {
                self.open(&file)?;
                if let Some(text) = filter {
                    self.intent(AppIntent::SearchTextChanged { text })?;
                }
                self.print_volume_view();
            }
            CliCommand::Materials { file } => {
                match file {
                    Some(file) => self.open(&file)?,
                    None => self.intent(AppIntent::NewWorldRequested)?,
                }
                for name in &self.state.ui.material_choices {
                    println!("{}", name);
                }
            }
            CliCommand::SetMaterial {
                file,
                volume,
                material,
                output,
            } => self.edit(
                &file,
                AppIntent::ApplyMaterialRequested { volume, material },
                output,
            )?,
            CliCommand::Rename {
                file,
                old_name,
                new_name,
                output,
            } => self.edit(
                &file,
                AppIntent::RenameVolumeRequested { old_name, new_name },
                output,
            )?,
            CliCommand::Delete {
                file,
                volume,
                output,
            } => self.edit(&file, AppIntent::DeleteVolumeRequested { name: volume }, output)?,
            CliCommand::InsertBox {
                file,
                name,
                parent,
                material,
                size,
                unit,
                at,
                rotate,
                output,
            } => {
                let unit = match unit {
                    Some(text) => LengthUnit::parse(&text)
                        .with_context(|| format!("Unbekannte Laengeneinheit '{}'", text))?,
                    None => self.state.options.default_length_unit,
                };
                let size = vec3(Some(&size));
                let request = InsertVolumeRequest::new(
                    name,
                    parent,
                    Shape::Box {
                        x: size.x,
                        y: size.y,
                        z: size.z,
                    },
                    material,
                )
                .with_length_unit(unit)
                .with_transform(vec3(at.as_deref()), vec3(rotate.as_deref()));
                self.edit(&file, AppIntent::InsertVolumeRequested { request }, output)?;
            }
            CliCommand::DefineMaterial {
                name,
                record: path,
                replace_broken_catalog,
            } => {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("Datei '{}' nicht lesbar", path.display()))?;
                let record: UserMaterialRecord = serde_json::from_str(&content)
                    .with_context(|| format!("Materialeintrag '{}' fehlerhaft", path.display()))?;
                self.confirm_catalog_overwrite(replace_broken_catalog)?;
                self.intent(AppIntent::DefineUserMaterialRequested { name, record })?;
                self.print_status();
            }
            CliCommand::RemoveMaterial {
                name,
                replace_broken_catalog,
            } => {
                self.confirm_catalog_overwrite(replace_broken_catalog)?;
                self.intent(AppIntent::RemoveUserMaterialRequested { name })?;
                self.print_status();
            }
            CliCommand::New { output } => {
                self.intent(AppIntent::NewWorldRequested)?;
                self.save(Some(output))?;
            }
        }
        Ok(())
    }

    fn confirm_catalog_overwrite(&mut self, confirmed: bool) -> Result<()> {
        if confirmed {
            self.intent(AppIntent::ConfirmCatalogOverwriteRequested)?;
        }
        Ok(())
    }

    fn print_status(&self) {
        if let Some(message) = self.state.ui.status_message.as_deref() {
            println!("{}", message);
        }
    }

    fn print_volume_view(&self) {
        match self.state.ui.volume_view.as_ref() {
            Some(VolumeView::Tree(tree)) => print!("{}", tree.render_text()),
            Some(VolumeView::Flat(entries)) => {
                for entry in entries {
                    println!("{} [{}]", entry.name, entry.material);
                }
            }
            None => println!("(keine Ansicht)"),
        }
    }
}

/// Drei CLI-Werte als Vektor, fehlend = Nullvektor.
fn vec3(values: Option<&[f64]>) -> DVec3 {
    match values {
        Some([x, y, z]) => DVec3::new(*x, *y, *z),
        _ => DVec3::ZERO,
    }
}
