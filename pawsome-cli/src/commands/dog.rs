use clap::{Args, Subcommand};
use pawsome_core::age::calculate_age;
use pawsome_core::view::{DogForm, DogSubmission, ImageChoice};
use pawsome_core::{Dog, ImageFile};
use std::path::PathBuf;

use super::{parse_date, today, OutputFormat, Workspace};
use crate::config::Config;

const UPLOAD_FAILED: &str = "画像のアップロードに失敗しました。";

#[derive(Args)]
pub struct DogCommand {
    #[command(subcommand)]
    pub command: DogSubcommand,
}

#[derive(Subcommand)]
pub enum DogSubcommand {
    /// List your dogs
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a dog's profile (defaults to the selected dog)
    Show {
        /// Dog ID or name
        dog: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a dog and select it
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        breed: String,

        /// Birthday (YYYY-MM-DD), defaults to today
        #[arg(long)]
        birthday: Option<String>,

        /// Photo: a local file to upload or an image URL
        #[arg(long)]
        image: Option<String>,
    },

    /// Edit a dog's profile
    Edit {
        /// Dog ID or name
        dog: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        breed: Option<String>,

        /// Birthday (YYYY-MM-DD)
        #[arg(long)]
        birthday: Option<String>,

        /// Photo: a local file to upload or an image URL
        #[arg(long)]
        image: Option<String>,
    },

    /// Delete a dog
    Delete {
        /// Dog ID or name
        dog: String,
    },

    /// Select the dog the other commands work on
    Select {
        /// Dog ID or name
        dog: String,
    },
}

impl DogCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let mut workspace = Workspace::open(config).await?;

        match &self.command {
            DogSubcommand::List { format } => list(&workspace, format),
            DogSubcommand::Show { dog, format } => {
                let dog = match dog {
                    Some(key) => workspace.find_dog(key)?,
                    None => workspace.active_dog()?,
                };
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(dog)?),
                    OutputFormat::Text => print_profile(dog),
                }
                Ok(())
            }
            DogSubcommand::Add {
                name,
                breed,
                birthday,
                image,
            } => {
                let mut form = DogForm::new(today());
                form.name = name.clone();
                form.breed = breed.clone();
                if let Some(b) = birthday {
                    form.birthday = parse_date(b)?;
                }
                form.image = image.as_deref().map(image_choice);
                submit(&mut workspace, form).await
            }
            DogSubcommand::Edit {
                dog,
                name,
                breed,
                birthday,
                image,
            } => {
                let mut form = DogForm::edit(workspace.find_dog(dog)?, today());
                if let Some(n) = name {
                    form.name = n.clone();
                }
                if let Some(b) = breed {
                    form.breed = b.clone();
                }
                if let Some(b) = birthday {
                    form.birthday = parse_date(b)?;
                }
                if let Some(i) = image {
                    form.image = Some(image_choice(i));
                }
                submit(&mut workspace, form).await
            }
            DogSubcommand::Delete { dog } => {
                let dog = workspace.find_dog(dog)?.clone();
                workspace
                    .store
                    .delete_dog(&dog.id)
                    .await
                    .ok_or_else(|| format!("Failed to delete dog: {}", dog.name))?;
                workspace.save()?;

                println!("Deleted dog: {}", dog.name);
                if let Some(active) = workspace.store.active_dog() {
                    println!("Selected dog is now {}", active.name);
                }
                Ok(())
            }
            DogSubcommand::Select { dog } => {
                let dog = workspace.find_dog(dog)?.clone();
                workspace.store.set_active_dog(Some(dog.id.clone()));
                workspace.save()?;
                println!("Selected {}", dog.name);
                Ok(())
            }
        }
    }
}

/// URLs are used as-is; anything else is a file to upload.
fn image_choice(arg: &str) -> ImageChoice {
    if arg.starts_with("http://") || arg.starts_with("https://") {
        ImageChoice::Url(arg.to_string())
    } else {
        ImageChoice::File(PathBuf::from(arg))
    }
}

async fn submit(
    workspace: &mut Workspace,
    form: DogForm,
) -> Result<(), Box<dyn std::error::Error>> {
    let submission = form.submit().ok_or("Name and breed are required")?;
    let image_url = resolve_image(workspace, submission.image()).await?;

    let saved = match &submission {
        DogSubmission::Add { .. } => {
            let dog = submission
                .to_new_dog(image_url)
                .ok_or("Failed to add dog")?;
            workspace.store.add_dog(dog).await.cloned()
        }
        DogSubmission::Update { .. } => {
            let (id, changes) = submission
                .to_update(image_url)
                .ok_or("Failed to update dog")?;
            workspace.store.update_dog(&id, changes).await.cloned()
        }
    };
    let dog = saved.ok_or("Failed to save dog")?;
    workspace.save()?;

    if form.is_editing() {
        println!("Updated dog:");
    } else {
        println!("Added dog:");
    }
    println!();
    print_profile(&dog);
    Ok(())
}

async fn resolve_image(
    workspace: &Workspace,
    image: &ImageChoice,
) -> Result<String, Box<dyn std::error::Error>> {
    let path = match image {
        ImageChoice::Url(url) => return Ok(url.clone()),
        ImageChoice::File(path) => path,
    };
    let user_id = workspace
        .store
        .user()
        .map(|u| u.id.clone())
        .ok_or("User not authenticated")?;

    let uploaded = match ImageFile::open(path) {
        Ok(file) => {
            workspace
                .store
                .backend()
                .upload_dog_image(&file, &user_id)
                .await
        }
        Err(e) => Err(e),
    };

    uploaded.map_err(|e| {
        tracing::error!("Error uploading image: {}", e);
        UPLOAD_FAILED.into()
    })
}

fn list(workspace: &Workspace, format: &OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let dogs = workspace.store.dogs();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(dogs)?);
        }
        OutputFormat::Text => {
            if dogs.is_empty() {
                println!("No dogs yet. Add one with 'paw dog add'.");
                return Ok(());
            }
            let active = workspace.store.active_dog_id();
            let today = today();
            for dog in dogs {
                let marker = if active == Some(dog.id.as_str()) { "*" } else { " " };
                let age = dog
                    .birthday
                    .map(|b| calculate_age(b, today))
                    .unwrap_or_default();
                println!("{} {}  {}  {}  [{}]", marker, dog.name, dog.breed, age, dog.id);
            }
        }
    }
    Ok(())
}

fn print_profile(dog: &Dog) {
    print!("{}", dog);
    if let Some(birthday) = dog.birthday {
        println!("Age: {}", calculate_age(birthday, today()));
    }
    println!("ID: {}", dog.id);
}
