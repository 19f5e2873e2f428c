use clap::{Parser, Subcommand};
use rx_core::config::database_path_from_env_value;
use rx_core::db::repository::{
    count_doctors, count_patients, count_prescription_medicaments, count_prescriptions,
};
use rx_core::models::Medicament;
use rx_core::{CoreConfig, Database, DatabaseError, MedicamentService, PrescriptionService};

#[derive(Parser)]
#[command(name = "rx")]
#[command(about = "Prescription service CLI")]
struct Cli {
    /// SQLite database file (overrides RX_DATABASE_PATH)
    #[arg(long, global = true)]
    database: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database and apply pending migrations
    Init,
    /// Add a medicament to the catalogue
    AddMedicament {
        /// Medicament id referenced by submissions
        id: i32,
        /// Medicament name
        name: String,
        /// Free-text description
        #[arg(long, default_value = "")]
        description: String,
        /// Form or category (tablet, syrup, ...)
        #[arg(long, default_value = "")]
        kind: String,
    },
    /// List the medicament catalogue
    ListMedicaments,
    /// Show a stored prescription with its patient, doctor and lines
    ShowPrescription {
        /// Prescription id
        id: i32,
    },
    /// Print row counts for every table written by submissions
    Stats,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use 'rx --help' for commands");
        return Ok(());
    };

    let database = cli
        .database
        .or_else(|| std::env::var("RX_DATABASE_PATH").ok());
    let cfg = CoreConfig::new(database_path_from_env_value(database))?;
    let db = Database::open(&cfg)?;

    match command {
        Commands::Init => {
            println!("Database ready at {}", cfg.database_path().display());
        }
        Commands::AddMedicament {
            id,
            name,
            description,
            kind,
        } => {
            let medicament = Medicament {
                id_medicament: id,
                name,
                description,
                kind,
            };
            match MedicamentService::new(db).add(&medicament) {
                Ok(()) => println!("Added medicament {}: {}", id, medicament.name),
                Err(e) => eprintln!("Error adding medicament: {}", e),
            }
        }
        Commands::ListMedicaments => {
            let medicaments = MedicamentService::new(db).list()?;
            if medicaments.is_empty() {
                println!("No medicaments found.");
            } else {
                for m in medicaments {
                    println!(
                        "ID: {}, Name: {}, Type: {}, Description: {}",
                        m.id_medicament, m.name, m.kind, m.description
                    );
                }
            }
        }
        Commands::ShowPrescription { id } => {
            match PrescriptionService::new(db).prescription_details(id)? {
                Some(details) => {
                    let p = &details.prescription;
                    println!(
                        "Prescription {} issued {} due {}",
                        p.id_prescription, p.date, p.due_date
                    );
                    println!(
                        "Patient {}: {} {} (born {})",
                        details.patient.id_patient,
                        details.patient.first_name,
                        details.patient.last_name,
                        details.patient.birthdate.date()
                    );
                    println!(
                        "Doctor {}: {} {} <{}>",
                        details.doctor.id_doctor,
                        details.doctor.first_name,
                        details.doctor.last_name,
                        details.doctor.email
                    );
                    for line in details.lines {
                        println!(
                            "  - {} ({}): dose {}, {}",
                            line.medicament.name,
                            line.medicament.id_medicament,
                            line.dose,
                            line.details
                        );
                    }
                }
                None => println!("No prescription with ID {}.", id),
            }
        }
        Commands::Stats => {
            let (patients, doctors, prescriptions, lines) = db.with_connection(|conn| {
                Ok::<_, DatabaseError>((
                    count_patients(conn)?,
                    count_doctors(conn)?,
                    count_prescriptions(conn)?,
                    count_prescription_medicaments(conn)?,
                ))
            })?;
            println!("Patients: {}", patients);
            println!("Doctors: {}", doctors);
            println!("Prescriptions: {}", prescriptions);
            println!("Prescription lines: {}", lines);
        }
    }

    Ok(())
}
