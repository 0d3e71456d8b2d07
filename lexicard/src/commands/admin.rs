use lexicard_core::models::UserProfile;
use lexicard_store::{ProfileService, ProfileServiceError};
use miette::{miette, Context, IntoDiagnostic, Result};

use crate::{
    cli::AdminCommand,
    state::{ApplicationState, SignIn},
};


fn describe_profile(profile: &UserProfile) -> String {
    let mut description = format!(
        "{} {} <{}> {} {}",
        profile.id,
        profile.greeting_name(),
        profile.email,
        profile.role.name(),
        profile.status.name()
    );

    if let (Some(reviewed_by), Some(reviewed_at)) = (&profile.reviewed_by, profile.reviewed_at) {
        description.push_str(&format!(
            " (reviewed by {} at {})",
            reviewed_by,
            reviewed_at.format("%Y-%m-%d %H:%M")
        ));
    }

    description
}


/// Review results that are the administrator's mistake are reported, not raised.
fn report_review_error(error: ProfileServiceError) -> Result<()> {
    match error {
        ProfileServiceError::StoreError { .. } => Err::<(), _>(error)
            .into_diagnostic()
            .wrap_err("Failed to review the account."),
        _ => {
            println!("{}", error);
            Ok(())
        }
    }
}


pub(super) async fn run_admin_command(
    state: &ApplicationState,
    id_token: Option<&str>,
    command: AdminCommand,
) -> Result<()> {
    let profile_service: &ProfileService = state
        .profile_service
        .as_ref()
        .ok_or_else(|| miette!("Accounts are not available, administration is impossible."))?;

    let actor = match state.sign_in(id_token).await {
        SignIn::Granted { profile } => profile,
        SignIn::Blocked { message, .. } => {
            println!("{}", message);
            return Ok(());
        }
        SignIn::Guest { notice } => {
            if let Some(notice) = notice {
                println!("{}", notice);
            }
            println!("Administration requires signing in with an administrator account.");
            return Ok(());
        }
    };

    match command {
        AdminCommand::List { status } => {
            let profiles = match profile_service
                .list_profiles(&actor, status.into_approval_status())
                .await
            {
                Ok(profiles) => profiles,
                Err(error) => return report_review_error(error),
            };

            if profiles.is_empty() {
                println!("No matching accounts.");
            }

            for profile in &profiles {
                println!("{}", describe_profile(profile));
            }
        }
        AdminCommand::Approve { user_id } => match profile_service.approve(&actor, &user_id).await {
            Ok(profile) => println!("Approved {}", describe_profile(&profile)),
            Err(error) => return report_review_error(error),
        },
        AdminCommand::Reject { user_id } => match profile_service.reject(&actor, &user_id).await {
            Ok(profile) => println!("Rejected {}", describe_profile(&profile)),
            Err(error) => return report_review_error(error),
        },
    }

    Ok(())
}
