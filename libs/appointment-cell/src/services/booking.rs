use std::sync::Arc;

use chrono::Duration;
use tracing::{error, info, warn};

use notification_cell::models::{AppointmentConfirmation, NotificationError};
use notification_cell::services::ConfirmationMailer;
use shared_database::ClinicDb;
use shared_models::{NewAppointment, StoreError};

use crate::models::{
    AvailabilityOutcome, AvailabilityQuery, BookAppointmentRequest, BookingOutcome,
    CancelAppointmentRequest, CancelOutcome, RescheduleAppointmentRequest, RescheduleOutcome,
};
use crate::services::assignment::assign_doctor;
use crate::services::validation::{parse_slot, validate_slot};

/// Appointments span exactly half an hour.
const SLOT_MINUTES: i64 = 30;

pub struct BookingService {
    db: ClinicDb,
    mailer: Arc<ConfirmationMailer>,
}

impl BookingService {
    pub fn new(db: ClinicDb, mailer: Arc<ConfirmationMailer>) -> Self {
        Self { db, mailer }
    }

    /// Book a validated slot with the clinician the illness calls for.
    pub async fn book(&self, request: BookAppointmentRequest) -> BookingOutcome {
        let start = match validate_slot(&request.appointment_date, &request.appointment_time) {
            Ok(start) => start,
            Err(e) => {
                warn!("Rejected appointment request: {}", e);
                return BookingOutcome::ValidationError {
                    message: e.to_string(),
                };
            }
        };

        let doctor_name = assign_doctor(&request.illness);

        match self.db.slot_taken(doctor_name, start).await {
            Ok(true) => {
                return BookingOutcome::Conflict {
                    message: conflict_message(doctor_name),
                }
            }
            Ok(false) => {}
            Err(e) => {
                error!("Appointment booking failed: {}", e);
                return BookingOutcome::Error {
                    message: "A database error occurred while booking the appointment."
                        .to_string(),
                };
            }
        }

        let appointment = NewAppointment {
            patient_id: request.patient_id,
            doctor_name: doctor_name.to_string(),
            start,
            end: start + Duration::minutes(SLOT_MINUTES),
        };

        let appointment_id = match self.db.insert_appointment(&appointment).await {
            Ok(id) => id,
            // Two callers can pass the availability check together; the
            // unique index serializes them here.
            Err(StoreError::SlotTaken) => {
                return BookingOutcome::Conflict {
                    message: conflict_message(doctor_name),
                }
            }
            Err(e) => {
                error!("Appointment booking failed: {}", e);
                return BookingOutcome::Error {
                    message: "A database error occurred while booking the appointment."
                        .to_string(),
                };
            }
        };

        info!(
            "Appointment {} created for patient {}.",
            appointment_id, request.patient_id
        );

        self.confirm_by_patient_id(
            request.patient_id,
            doctor_name,
            &request.appointment_date,
            &request.appointment_time,
        )
        .await;

        BookingOutcome::Success {
            appointment_id,
            doctor_name: doctor_name.to_string(),
            time: request.appointment_time.clone(),
            message: format!(
                "Appointment successfully booked with {} at {}.",
                doctor_name, request.appointment_time
            ),
        }
    }

    /// Cancel the appointment a patient holds at the given slot.
    pub async fn cancel(&self, request: CancelAppointmentRequest) -> CancelOutcome {
        let start = match parse_slot(&request.appointment_date, &request.appointment_time) {
            Ok(start) => start,
            Err(_) => {
                return CancelOutcome::Error {
                    message: "Invalid time or date format.".to_string(),
                }
            }
        };

        let appointment_id = match self.db.find_appointment_id(request.patient_id, start).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                return CancelOutcome::NotFound {
                    message: "No matching appointment was found for this patient at the \
                              specified time."
                        .to_string(),
                }
            }
            Err(e) => {
                error!("Appointment cancellation failed: {}", e);
                return CancelOutcome::Error {
                    message: "A database error occurred during cancellation.".to_string(),
                };
            }
        };

        match self.db.delete_appointment(appointment_id).await {
            Ok(rows) if rows > 0 => {
                info!(
                    "Successfully canceled appointment {} for patient {}.",
                    appointment_id, request.patient_id
                );
                CancelOutcome::Success {
                    message: "The appointment has been successfully canceled.".to_string(),
                }
            }
            // Found a moment ago but zero rows deleted: report it rather
            // than pretend the cancellation happened.
            Ok(_) => CancelOutcome::Error {
                message: "Failed to cancel the appointment. Please try again.".to_string(),
            },
            Err(e) => {
                error!("Appointment cancellation failed: {}", e);
                CancelOutcome::Error {
                    message: "A database error occurred during cancellation.".to_string(),
                }
            }
        }
    }

    /// Report whether the slot is free with the clinician the illness maps
    /// to, without writing anything.
    pub async fn check_availability(&self, query: AvailabilityQuery) -> AvailabilityOutcome {
        let start = match validate_slot(&query.appointment_date, &query.appointment_time) {
            Ok(start) => start,
            Err(e) => {
                return AvailabilityOutcome::Error {
                    message: e.to_string(),
                }
            }
        };

        let doctor_name = assign_doctor(&query.illness);

        match self.db.slot_taken(doctor_name, start).await {
            Ok(true) => AvailabilityOutcome::Unavailable {
                doctor_name: doctor_name.to_string(),
                message: format!(
                    "The slot at {} with {} is already booked.",
                    query.appointment_time, doctor_name
                ),
            },
            Ok(false) => AvailabilityOutcome::Available {
                doctor_name: doctor_name.to_string(),
                message: format!(
                    "The slot at {} with {} is available.",
                    query.appointment_time, doctor_name
                ),
            },
            Err(e) => {
                error!("Availability check failed: {}", e);
                AvailabilityOutcome::Error {
                    message: "A database error occurred while checking availability.".to_string(),
                }
            }
        }
    }

    /// Move an existing appointment to a new slot with the same clinician.
    ///
    /// The new slot is validated before the old booking is touched, and the
    /// swap itself is transactional: a rejected target leaves the original
    /// appointment standing.
    pub async fn reschedule(&self, request: RescheduleAppointmentRequest) -> RescheduleOutcome {
        let new_start = match validate_slot(
            &request.new_appointment_date,
            &request.new_appointment_time,
        ) {
            Ok(start) => start,
            Err(e) => {
                return RescheduleOutcome::Error {
                    message: format!("The new appointment time is invalid. Reason: {}", e),
                }
            }
        };

        let old_start = match parse_slot(
            &request.old_appointment_date,
            &request.old_appointment_time,
        ) {
            Ok(start) => start,
            Err(_) => {
                return RescheduleOutcome::Error {
                    message: "Invalid date or time format provided.".to_string(),
                }
            }
        };

        let context = match self
            .db
            .appointment_with_patient(request.patient_id, old_start)
            .await
        {
            Ok(Some(context)) => context,
            Ok(None) => {
                return RescheduleOutcome::NotFound {
                    message: "The original appointment to reschedule was not found.".to_string(),
                }
            }
            Err(e) => {
                error!("Appointment rescheduling failed: {}", e);
                return RescheduleOutcome::Error {
                    message: "A database error occurred during the rescheduling process."
                        .to_string(),
                };
            }
        };

        // Probe the new slot the way a fresh booking would, with the
        // illness on the patient's file.
        let probe = AvailabilityQuery {
            appointment_date: request.new_appointment_date.clone(),
            appointment_time: request.new_appointment_time.clone(),
            illness: context.illness.clone(),
        };
        match self.check_availability(probe).await {
            AvailabilityOutcome::Available { .. } => {}
            AvailabilityOutcome::Unavailable { message, .. } => {
                return RescheduleOutcome::Conflict {
                    message: format!("The new time slot is not available. Reason: {}", message),
                }
            }
            AvailabilityOutcome::Error { message } => {
                return RescheduleOutcome::Error { message }
            }
        }

        let replacement = NewAppointment {
            patient_id: request.patient_id,
            doctor_name: context.doctor_name.clone(),
            start: new_start,
            end: new_start + Duration::minutes(SLOT_MINUTES),
        };

        let new_appointment_id = match self
            .db
            .replace_appointment(context.appointment_id, &replacement)
            .await
        {
            Ok(id) => id,
            // The probe and the swap are not one transaction; the unique
            // index catches a booking that slipped in between.
            Err(StoreError::SlotTaken) => {
                return RescheduleOutcome::Conflict {
                    message: format!(
                        "The new time slot is not available. Reason: The slot at {} with {} \
                         is already booked.",
                        request.new_appointment_time, context.doctor_name
                    ),
                }
            }
            Err(e) => {
                error!("Appointment rescheduling failed: {}", e);
                return RescheduleOutcome::Error {
                    message: "A database error occurred during the rescheduling process."
                        .to_string(),
                };
            }
        };

        info!(
            "Appointment rescheduled for patient {}. New ID is {}.",
            request.patient_id, new_appointment_id
        );

        if let Some(email) = context.email {
            self.dispatch_confirmation(AppointmentConfirmation {
                patient_email: email,
                patient_name: context.patient_name,
                doctor_name: context.doctor_name.clone(),
                appointment_date: request.new_appointment_date.clone(),
                appointment_time: request.new_appointment_time.clone(),
            })
            .await;
        } else {
            warn!(
                "Could not find details for patient ID {} to send confirmation email.",
                request.patient_id
            );
        }

        RescheduleOutcome::Success {
            message: format!(
                "Your appointment has been successfully rescheduled to {} at {} with {}.",
                request.new_appointment_date, request.new_appointment_time, context.doctor_name
            ),
        }
    }

    /// Look up the patient's contact details and send the confirmation.
    /// Best-effort: nothing here changes the caller's outcome.
    async fn confirm_by_patient_id(
        &self,
        patient_id: i64,
        doctor_name: &str,
        appointment_date: &str,
        appointment_time: &str,
    ) {
        let contact = match self.db.patient_contact(patient_id).await {
            Ok(Some(contact)) => contact,
            Ok(None) => {
                warn!(
                    "Could not find details for patient ID {} to send confirmation email.",
                    patient_id
                );
                return;
            }
            Err(e) => {
                warn!(
                    "Could not load contact details for patient {}: {}",
                    patient_id, e
                );
                return;
            }
        };

        let Some(email) = contact.email else {
            warn!(
                "Could not find details for patient ID {} to send confirmation email.",
                patient_id
            );
            return;
        };

        self.dispatch_confirmation(AppointmentConfirmation {
            patient_email: email,
            patient_name: contact.name,
            doctor_name: doctor_name.to_string(),
            appointment_date: appointment_date.to_string(),
            appointment_time: appointment_time.to_string(),
        })
        .await;
    }

    async fn dispatch_confirmation(&self, confirmation: AppointmentConfirmation) {
        match self.mailer.send_confirmation(&confirmation).await {
            Ok(()) => {}
            Err(NotificationError::NotConfigured) => {
                warn!("Email notifications are not configured. Skipping confirmation email.");
            }
            Err(e) => {
                error!("Error sending confirmation email: {}", e);
            }
        }
    }
}

fn conflict_message(doctor_name: &str) -> String {
    format!(
        "Sorry, {} is already booked at that time. Please choose another slot.",
        doctor_name
    )
}
