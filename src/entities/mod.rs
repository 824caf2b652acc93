pub mod booking;
pub mod cms;
pub mod content;
pub mod location;
pub mod people;

pub use booking::{Booking, BookingStatus};
pub use cms::{ABOUT_SECTION_PATH, AboutSection, Badge, GalleryImage, Point, ResourceCard};
pub use content::{BlogPost, Faq, Testimonial};
pub use location::{LocationService, NewLocation, ServiceItem, create_location};
pub use people::{Application, CareSeeker, Caregiver, Gender};
